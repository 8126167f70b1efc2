//! Benchmarks for sequential and split collapse draining.
//!
//! Run with: cargo bench --bench collapse_bench

use collapse_core::{drain_split, ops, CollapseExt, Cursor, Parallel, Sequential, VecCursor};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn input(len: usize, run: usize) -> Vec<u64> {
    (0..len as u64).map(|i| i / run as u64).collect()
}

fn collapse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("collapse");

    // (name, elements, average run length)
    let cases = [
        ("short_runs", 1_000_000, 2),
        ("long_runs", 1_000_000, 1_000),
        ("single_run", 1_000_000, 1_000_000),
    ];

    for (name, len, run) in cases {
        let data = input(len, run);
        group.throughput(Throughput::Elements(len as u64));
        group.sample_size(10);
        group.measurement_time(std::time::Duration::from_secs(3));

        group.bench_with_input(BenchmarkId::new("unsplit", name), &data, |b, data| {
            b.iter(|| {
                let mut cursor = VecCursor::new(data.clone()).collapse(ops::run_lengths());
                let mut count = 0usize;
                cursor.for_each_remaining(|_| count += 1);
                black_box(count)
            })
        });

        group.bench_with_input(BenchmarkId::new("split_sequential", name), &data, |b, data| {
            b.iter(|| {
                let cursor = VecCursor::new(data.clone()).collapse(ops::run_lengths());
                black_box(drain_split(&Sequential, cursor, 8).len())
            })
        });

        group.bench_with_input(BenchmarkId::new("split_parallel", name), &data, |b, data| {
            let strategy = Parallel::global();
            b.iter(|| {
                let cursor = VecCursor::new(data.clone()).collapse(ops::run_lengths());
                black_box(drain_split(&strategy, cursor, 8).len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, collapse_benchmark);
criterion_main!(benches);
