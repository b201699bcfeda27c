//! Benchmark suite for Fisher's test application
//!
//! Run with: cargo bench

use collexeme_scorer::{apply_fishers, apply_fishers_parallel, fisher_exact, LabeledMatrix};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 200 verbs x 12 constructions with deterministic, uneven counts
fn synthetic_matrix() -> LabeledMatrix {
    let rows = 200;
    let cols = 12;
    let values = (0..rows * cols)
        .map(|i| ((i * 37 + (i / cols) * 11) % 53) as f64)
        .collect();

    LabeledMatrix::new(
        (0..rows).map(|r| format!("verb_{}", r)).collect(),
        (0..cols).map(|c| format!("construction_{}", c)).collect(),
        values,
    )
    .expect("valid synthetic matrix")
}

fn bench_fisher_exact(c: &mut Criterion) {
    c.bench_function("fisher_exact 2x2", |b| {
        b.iter(|| fisher_exact(black_box(40.0), black_box(3.0), black_box(112.0), black_box(845.0)))
    });
}

fn bench_apply_fishers(c: &mut Criterion) {
    let matrix = synthetic_matrix();

    c.bench_function("apply_fishers 200x12", |b| {
        b.iter(|| apply_fishers(black_box(&matrix), 0, 1, true))
    });

    c.bench_function("apply_fishers_parallel 200x12", |b| {
        b.iter(|| apply_fishers_parallel(black_box(&matrix), 0, 1, true))
    });
}

criterion_group!(benches, bench_fisher_exact, bench_apply_fishers);
criterion_main!(benches);
