#![no_main]
use libfuzzer_sys::fuzz_target;
use mmdb::Reader;
use std::sync::OnceLock;

fn encode_string(s: &str, buf: &mut Vec<u8>) {
    buf.push(0x40 | s.len() as u8);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_uint32(n: u32, buf: &mut Vec<u8>) {
    buf.push(0xC4);
    buf.extend_from_slice(&n.to_be_bytes());
}

fn encode_uint16(n: u16, buf: &mut Vec<u8>) {
    buf.push(0xA2);
    buf.extend_from_slice(&n.to_be_bytes());
}

/// A minimal, byte-exact IPv6-capable database (so both IPv4 and IPv6
/// fuzz inputs exercise a real lookup) where every address resolves to
/// the same single-key map.
fn minimal_database() -> Vec<u8> {
    let mut data_section = Vec::new();
    data_section.push(0xE0 | 1u8); // map, 1 entry
    encode_string("result", &mut data_section);
    encode_string("hit", &mut data_section);
    let data_record_value = 1u32 + 16;

    let mut tree = vec![0u8; 6];
    tree[0..3].copy_from_slice(&data_record_value.to_be_bytes()[1..4]);
    tree[3..6].copy_from_slice(&data_record_value.to_be_bytes()[1..4]);

    let mut metadata = Vec::new();
    metadata.push(0xE0 | 8u8);
    encode_string("node_count", &mut metadata);
    encode_uint32(1, &mut metadata);
    encode_string("record_size", &mut metadata);
    encode_uint16(24, &mut metadata);
    encode_string("ip_version", &mut metadata);
    encode_uint16(6, &mut metadata);
    encode_string("database_type", &mut metadata);
    encode_string("Fuzz", &mut metadata);
    encode_string("languages", &mut metadata);
    metadata.push(0x00);
    encode_string("binary_format_major_version", &mut metadata);
    encode_uint16(2, &mut metadata);
    encode_string("binary_format_minor_version", &mut metadata);
    encode_uint16(0, &mut metadata);
    encode_string("build_epoch", &mut metadata);
    encode_uint32(1_700_000_000, &mut metadata);

    let mut file = Vec::new();
    file.extend_from_slice(&tree);
    file.extend_from_slice(&[0u8; 16]);
    file.extend_from_slice(&data_section);
    file.extend_from_slice(b"\xAB\xCD\xEFMaxMind.com");
    file.extend_from_slice(&metadata);
    file
}

static DB_BYTES: OnceLock<Vec<u8>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let bytes = DB_BYTES.get_or_init(minimal_database);
    let reader = Reader::from_bytes(bytes.clone()).expect("fixture database must be well-formed");

    // Malformed/weird text, embedded NULs, extreme lengths: none of this
    // should panic, regardless of whether it parses as an IP address.
    let _ = reader.lookup_string(text);
});
