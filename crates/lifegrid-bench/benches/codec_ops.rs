//! Criterion benchmarks for the shard wire codec.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lifegrid_bench::reference_profile;
use lifegrid_shard::codec::{read_request, write_request};
use lifegrid_shard::{ComputeShard, ShardRequest};

fn make_request(turns: u64) -> ShardRequest {
    ShardRequest {
        grid: reference_profile(3),
        workers: 4,
        turns,
        start_column: 0,
        end_column: 255,
    }
}

/// Benchmark: encode a 512x512 request.
fn bench_encode_request(c: &mut Criterion) {
    let request = make_request(1);
    c.bench_function("codec_encode_request_512", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(512 * 512 + 64);
            write_request(&mut buf, &request).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: decode the same request.
fn bench_decode_request(c: &mut Criterion) {
    let mut encoded = Vec::new();
    write_request(&mut encoded, &make_request(1)).unwrap();
    c.bench_function("codec_decode_request_512", |b| {
        b.iter(|| {
            let mut cursor = encoded.as_slice();
            let decoded = read_request(&mut cursor).unwrap().unwrap();
            black_box(&decoded);
        });
    });
}

/// Benchmark: in-process shard call over half the columns.
fn bench_execute_half(c: &mut Criterion) {
    let shard = ComputeShard::new();
    let request = make_request(1);
    c.bench_function("shard_execute_half_512", |b| {
        b.iter(|| black_box(shard.execute(request.clone()).unwrap()));
    });
}

criterion_group!(benches, bench_encode_request, bench_decode_request, bench_execute_half);
criterion_main!(benches);
