//! Benchmarks for the bucket-statistics engine.
//!
//! Run with: cargo bench -p pos52-analytics

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pos52_analytics::outcome::forward_minima;
use pos52_analytics::position::trailing_positions;
use pos52_analytics::BucketStatsPipeline;
use pos52_config::AnalysisConfig;
use pos52_core::PriceSeries;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x
}

/// Random walk of daily closes starting at 100.
fn random_walk(len: usize) -> Vec<f64> {
    let mut close = 100.0;
    (0..len as u64)
        .map(|i| {
            let step = (simple_hash(7, i) % 401) as f64 / 100.0 - 2.0;
            close = (close * (1.0 + step / 100.0)).max(1.0);
            close
        })
        .collect()
}

fn series(len: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    PriceSeries::from_closes(start, &random_walk(len)).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_trailing_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("trailing_positions");

    for lookback in [21, 63, 252, 1260] {
        let closes = random_walk(10_000);
        group.throughput(Throughput::Elements(closes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lookback), &closes, |b, closes| {
            b.iter(|| trailing_positions(black_box(closes), lookback));
        });
    }

    group.finish();
}

fn bench_forward_minima(c: &mut Criterion) {
    let closes = random_walk(10_000);
    c.bench_function("forward_minima_63", |b| {
        b.iter(|| forward_minima(black_box(&closes), 63));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");

    for size in [1_000, 5_000, 25_000] {
        let s = series(size);
        let pipeline = BucketStatsPipeline::new(AnalysisConfig::default()).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &s, |b, s| {
            b.iter(|| pipeline.run(black_box(s)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_trailing_positions,
    bench_forward_minima,
    bench_pipeline
);
criterion_main!(benches);
