use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mmdb::decoder::Decoder;

fn encode_string(s: &str, buf: &mut Vec<u8>) {
    buf.push(0x40 | s.len() as u8);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_uint32(n: u32, buf: &mut Vec<u8>) {
    buf.push(0xC4);
    buf.extend_from_slice(&n.to_be_bytes());
}

fn flat_map_data(field_count: usize) -> Vec<u8> {
    let mut data = Vec::new();
    data.push(0xE0 | field_count as u8);
    for i in 0..field_count {
        encode_string(&format!("field_{}", i), &mut data);
        encode_uint32(i as u32, &mut data);
    }
    data
}

fn nested_map_data(depth: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..depth {
        data.push(0xE0 | 1u8);
        encode_string("child", &mut data);
    }
    encode_string("leaf", &mut data);
    data
}

fn bench_decode_flat_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_flat_map");
    for field_count in [4, 16, 64].iter() {
        let data = flat_map_data(*field_count);
        group.throughput(Throughput::Elements(*field_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(field_count), field_count, |b, _| {
            let decoder = Decoder::new(&data);
            b.iter(|| {
                let list = decoder.decode_tree(black_box(0)).unwrap();
                black_box(list);
            });
        });
    }
    group.finish();
}

fn bench_decode_nested_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_nested_map");
    for depth in [1, 8, 32].iter() {
        let data = nested_map_data(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            let decoder = Decoder::new(&data);
            b.iter(|| {
                let list = decoder.decode_tree(black_box(0)).unwrap();
                black_box(list);
            });
        });
    }
    group.finish();
}

fn bench_get_path(c: &mut Criterion) {
    let data = nested_map_data(16);
    let decoder = Decoder::new(&data);
    let path: Vec<&str> = std::iter::repeat("child").take(16).collect();

    c.bench_function("get_path_deep_navigation", |b| {
        b.iter(|| {
            let outcome = decoder.get_path(black_box(0), black_box(&path)).unwrap();
            black_box(outcome);
        });
    });
}

criterion_group!(benches, bench_decode_flat_map, bench_decode_nested_map, bench_get_path);
criterion_main!(benches);
