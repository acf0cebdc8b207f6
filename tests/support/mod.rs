//! Hand-built MMDB byte buffers shared by the integration tests.
//!
//! There's no real `.mmdb` fixture in this environment, so every test
//! database here is assembled byte-by-byte the same way the unit tests
//! in `src/tree.rs`/`src/reader.rs` do it.

pub fn encode_string(s: &str, buf: &mut Vec<u8>) {
    assert!(s.len() < 29, "helper only handles small-size strings");
    buf.push(0x40 | s.len() as u8);
    buf.extend_from_slice(s.as_bytes());
}

pub fn encode_uint32(n: u32, buf: &mut Vec<u8>) {
    buf.push(0xC4);
    buf.extend_from_slice(&n.to_be_bytes());
}

pub fn encode_uint16(n: u16, buf: &mut Vec<u8>) {
    buf.push(0xA2);
    buf.extend_from_slice(&n.to_be_bytes());
}

pub fn encode_map_header(count: u8, buf: &mut Vec<u8>) {
    assert!(count < 29);
    buf.push(0xE0 | count);
}

fn metadata_block(node_count: u32, record_size_bits: u16, ip_version: u16, database_type: &str) -> Vec<u8> {
    let mut metadata = Vec::new();
    encode_map_header(8, &mut metadata);
    encode_string("node_count", &mut metadata);
    encode_uint32(node_count, &mut metadata);
    encode_string("record_size", &mut metadata);
    encode_uint16(record_size_bits, &mut metadata);
    encode_string("ip_version", &mut metadata);
    encode_uint16(ip_version, &mut metadata);
    encode_string("database_type", &mut metadata);
    encode_string(database_type, &mut metadata);
    encode_string("languages", &mut metadata);
    metadata.push(0x00); // empty array
    encode_string("binary_format_major_version", &mut metadata);
    encode_uint16(2, &mut metadata);
    encode_string("binary_format_minor_version", &mut metadata);
    encode_uint16(0, &mut metadata);
    encode_string("build_epoch", &mut metadata);
    encode_uint32(1_700_000_000, &mut metadata);
    metadata
}

fn assemble(tree: Vec<u8>, data_section: Vec<u8>, metadata: Vec<u8>) -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(&tree);
    file.extend_from_slice(&[0u8; 16]);
    file.extend_from_slice(&data_section);
    file.extend_from_slice(b"\xAB\xCD\xEFMaxMind.com");
    file.extend_from_slice(&metadata);
    file
}

/// A 2-node, 24-bit-record IPv4 database:
/// - `0.0.0.0/2` (and any address starting with bits `00`) -> `{"name": "A"}`
/// - `128.0.0.0/1` (any address starting with bit `1`) -> `{"name": "B"}`
/// - addresses starting with bits `01` -> not found
pub fn two_node_v4_database() -> Vec<u8> {
    let mut data_section = Vec::new();
    encode_map_header(1, &mut data_section);
    encode_string("name", &mut data_section);
    encode_string("A", &mut data_section);
    let b_offset = data_section.len() as u32;
    encode_map_header(1, &mut data_section);
    encode_string("name", &mut data_section);
    encode_string("B", &mut data_section);

    let node_count = 2u32;
    let rec_a = node_count + 16;
    let rec_b = node_count + 16 + b_offset;
    let not_found = node_count;

    let mut tree = vec![0u8; 12];
    tree[0..3].copy_from_slice(&1u32.to_be_bytes()[1..4]); // node0 left -> node1
    tree[3..6].copy_from_slice(&rec_b.to_be_bytes()[1..4]); // node0 right -> data B
    tree[6..9].copy_from_slice(&rec_a.to_be_bytes()[1..4]); // node1 left -> data A
    tree[9..12].copy_from_slice(&not_found.to_be_bytes()[1..4]); // node1 right -> not found

    assemble(tree, data_section, metadata_block(node_count, 24, 4, "Test-V4"))
}

/// A single-node IPv6 database where every address resolves to a nested
/// record, for exercising `get_value`'s path navigation end to end.
pub fn single_node_v6_database_with_nested_record() -> Vec<u8> {
    let mut data_section = Vec::new();
    encode_map_header(2, &mut data_section);
    encode_string("country", &mut data_section);
    encode_map_header(1, &mut data_section);
    encode_string("iso_code", &mut data_section);
    encode_string("US", &mut data_section);
    encode_string("names", &mut data_section);
    data_section.push(0x02); // control byte: type 0 (extended), size 2
    data_section.push(0x04); // extended type 7 + 4 = 11 (array)
    encode_string("a", &mut data_section);
    encode_string("b", &mut data_section);

    let node_count = 1u32;
    let rec = node_count + 16;
    let not_found = node_count;

    let mut tree = vec![0u8; 6];
    tree[0..3].copy_from_slice(&rec.to_be_bytes()[1..4]);
    tree[3..6].copy_from_slice(&not_found.to_be_bytes()[1..4]);

    assemble(tree, data_section, metadata_block(node_count, 24, 6, "Test-V6"))
}
