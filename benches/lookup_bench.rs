use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mmdb::Reader;

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

fn metadata_block(node_count: u32, ip_version: u16) -> Vec<u8> {
    let mut metadata = Vec::new();
    metadata.push(0xE0 | 8u8);
    encode_string("node_count", &mut metadata);
    encode_uint32(node_count, &mut metadata);
    encode_string("record_size", &mut metadata);
    encode_uint16(24, &mut metadata);
    encode_string("ip_version", &mut metadata);
    encode_uint16(ip_version, &mut metadata);
    encode_string("database_type", &mut metadata);
    encode_string("Bench", &mut metadata);
    encode_string("languages", &mut metadata);
    metadata.push(0x00);
    encode_string("binary_format_major_version", &mut metadata);
    encode_uint16(2, &mut metadata);
    encode_string("binary_format_minor_version", &mut metadata);
    encode_uint16(0, &mut metadata);
    encode_string("build_epoch", &mut metadata);
    encode_uint32(1_700_000_000, &mut metadata);
    metadata
}

/// A straight-line chain of `depth` nodes, every one descending on both
/// bits until the last node, which resolves both children to the same
/// data record. Every lookup walks the full chain: the worst case for
/// a trie this deep, and representative of a GeoIP-scale database where
/// most prefixes live far from the root.
fn chain_database(depth: u32, ip_version: u16) -> Vec<u8> {
    let mut data_section = Vec::new();
    data_section.push(0xE0 | 1u8);
    encode_string("name", &mut data_section);
    encode_string("leaf", &mut data_section);

    let node_count = depth;
    let data_record = node_count + 16;

    let mut tree = vec![0u8; (node_count as usize) * 6];
    for i in 0..depth {
        let next = if i + 1 == depth { data_record } else { i + 1 };
        let base = (i as usize) * 6;
        tree[base..base + 3].copy_from_slice(&next.to_be_bytes()[1..4]);
        tree[base + 3..base + 6].copy_from_slice(&next.to_be_bytes()[1..4]);
    }

    let mut file = Vec::new();
    file.extend_from_slice(&tree);
    file.extend_from_slice(&[0u8; 16]);
    file.extend_from_slice(&data_section);
    file.extend_from_slice(b"\xAB\xCD\xEFMaxMind.com");
    file.extend_from_slice(&metadata_block(node_count, ip_version));
    file
}

fn bench_ipv4_lookup_by_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipv4_lookup");
    for depth in [1u32, 8, 32].iter() {
        let reader = Reader::from_bytes(chain_database(*depth, 4)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| {
                let result = reader.lookup_string(black_box("203.0.113.7")).unwrap();
                black_box(result.found);
            });
        });
    }
    group.finish();
}

fn bench_ipv6_lookup_full_depth(c: &mut Criterion) {
    let reader = Reader::from_bytes(chain_database(128, 6)).unwrap();
    c.bench_function("ipv6_lookup_128_bit_chain", |b| {
        b.iter(|| {
            let result = reader.lookup_string(black_box("2001:db8::ffff")).unwrap();
            black_box(result.found);
        });
    });
}

fn bench_get_value_after_lookup(c: &mut Criterion) {
    let reader = Reader::from_bytes(chain_database(32, 4)).unwrap();
    c.bench_function("lookup_then_get_value", |b| {
        b.iter(|| {
            let result = reader.lookup_string(black_box("203.0.113.7")).unwrap();
            let value = result.entry.get_value(black_box(&["name"])).unwrap();
            black_box(value);
        });
    });
}

criterion_group!(
    benches,
    bench_ipv4_lookup_by_depth,
    bench_ipv6_lookup_full_depth,
    bench_get_value_after_lookup
);
criterion_main!(benches);
