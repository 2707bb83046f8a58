//! Criterion benchmarks for seeded mixed workloads.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use garage_bench::{random_workload, reference_engine, run_workload};
use garage_engine::{GarageConfig, GarageEngine, SystemClock};
use garage_layout::{LayoutConfig, LevelSpec};

/// Benchmark: 10K mixed arrivals/departures on the reference garage.
fn bench_reference_workload(c: &mut Criterion) {
    let ops = random_workload(10_000, 42);
    c.bench_function("workload_10k_reference", |b| {
        b.iter_batched(
            || reference_engine().unwrap(),
            |mut engine| black_box(run_workload(&mut engine, &ops).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: Same mix on a garage ten times the reference size.
fn bench_large_garage_workload(c: &mut Criterion) {
    let config = GarageConfig {
        layout: LayoutConfig {
            levels: vec![LevelSpec::new(2, 40, 40); 10],
            slots_per_row: 10,
        },
        ..GarageConfig::reference()
    };
    let ops = random_workload(100_000, 7);
    c.bench_function("workload_100k_large_garage", |b| {
        b.iter_batched(
            || GarageEngine::new(config.clone(), Box::new(SystemClock)).unwrap(),
            |mut engine| black_box(run_workload(&mut engine, &ops).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_reference_workload, bench_large_garage_workload);
criterion_main!(benches);
