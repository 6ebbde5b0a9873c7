//! Criterion benchmarks for generation stepping across worker counts.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lifegrid_bench::{reference_profile, stress_profile, warmed_engine, WORKER_COUNTS};
use lifegrid_engine::{diff, EventReporter};

/// Benchmark: one full step of the 512x512 reference board.
fn bench_step_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_512");
    group.throughput(Throughput::Elements(512 * 512));
    for workers in WORKER_COUNTS {
        let mut engine = warmed_engine(reference_profile(42), workers, 16);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| {
                engine.step();
                black_box(engine.turn());
            });
        });
    }
    group.finish();
}

/// Benchmark: one full step of the 2048x2048 stress board.
fn bench_step_stress(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_2048");
    group.sample_size(20);
    group.throughput(Throughput::Elements(2048 * 2048));
    for workers in [1, 4, 16] {
        let mut engine = warmed_engine(stress_profile(7), workers, 4);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| {
                engine.step();
                black_box(engine.turn());
            });
        });
    }
    group.finish();
}

/// Benchmark: diff two consecutive 512x512 generations.
fn bench_diff(c: &mut Criterion) {
    let engine = warmed_engine(reference_profile(42), 4, 17);
    c.bench_function("diff_512", |b| {
        b.iter(|| black_box(diff(engine.previous(), engine.grid()).count()));
    });
}

/// Benchmark: diff and emit one turn into an unbounded channel.
fn bench_report_turn(c: &mut Criterion) {
    let engine = warmed_engine(reference_profile(42), 4, 17);
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut reporter = EventReporter::new(tx);
    c.bench_function("report_turn_512", |b| {
        b.iter(|| {
            let flips = reporter.report_turn(engine.previous(), engine.grid(), engine.turn());
            rx.try_iter().for_each(drop);
            black_box(flips);
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference,
    bench_step_stress,
    bench_diff,
    bench_report_turn
);
criterion_main!(benches);
