//! Dense i-k-j kernel versus the generic fallback.
//!
//! The fallback is measured both directly and as reached through `*` on a
//! transposed view, which has no kernel of its own.
//!
//! Run with: cargo bench --bench matmul_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use strided_matrix::{abs, DenseMatrix, Major, Matmul, Matrix};

fn random_matrix(rng: &mut StdRng, n: usize, major: Major) -> DenseMatrix<f64> {
    DenseMatrix::from_fn(n, n, major, |_, _| rng.gen_range(-1.0..1.0)).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    group.sample_size(20);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for n in [16, 64, 128] {
        group.throughput(Throughput::Elements((n * n * n) as u64));

        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(&mut rng, n, Major::Row);
        let b = random_matrix(&mut rng, n, Major::Row);
        let b_col = b.to_major(Major::Col);
        let a_t = a.transposed().to_dense();

        group.bench_with_input(BenchmarkId::new("dense_ikj", n), &n, |bench, _| {
            bench.iter(|| a.matmul(&b).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("dense_ikj_col_rhs", n), &n, |bench, _| {
            bench.iter(|| a.matmul(&b_col).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("fallback_ijk", n), &n, |bench, _| {
            bench.iter(|| strided_matrix::ops::fallback::matmul(&a, &b).unwrap())
        });

        // (A^T)^T * B: same product, dispatched through the transposed view
        group.bench_with_input(BenchmarkId::new("transposed_view", n), &n, |bench, _| {
            bench.iter(|| a_t.transposed() * &b)
        });
    }
    group.finish();
}

fn bench_abs(c: &mut Criterion) {
    let mut group = c.benchmark_group("abs");
    group.sample_size(20);

    for n in [64, 256] {
        group.throughput(Throughput::Elements((n * n) as u64));

        let mut rng = StdRng::seed_from_u64(7);
        let a = random_matrix(&mut rng, n, Major::Col);

        group.bench_with_input(BenchmarkId::new("dense", n), &n, |bench, _| {
            bench.iter(|| abs(&a).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("fallback", n), &n, |bench, _| {
            bench.iter(|| abs(&a.transposed()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matmul, bench_abs);
criterion_main!(benches);
