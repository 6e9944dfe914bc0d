use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use signal_kmeans::{ClusterConfig, PerBaseMatrix, SignalKMeans};
use std::time::Duration;

fn bench_config(k: usize) -> ClusterConfig {
    ClusterConfig {
        k,
        tol: 1e-4,
        max_iters: Some(20),
        verbose: false,
    }
}

fn benchmark_kmeans_varying_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_rows");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_bases = 200;
    let k = 8;
    let row_counts = [1_000, 5_000, 10_000];

    for n_rows in row_counts.iter() {
        group.throughput(Throughput::Elements(*n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), n_rows, |b, &n_rows| {
            let data = Array2::random((n_rows, n_bases), Uniform::new(0.0, 50.0));

            b.iter(|| {
                let matrix = PerBaseMatrix::indexed(data.clone());
                let mut kmeans = SignalKMeans::with_config(matrix, bench_config(k)).unwrap();
                kmeans.run().unwrap();
                black_box(kmeans)
            });
        });
    }
    group.finish();
}

fn benchmark_kmeans_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_rows = 5_000;
    let n_bases = 200;
    let cluster_counts = [2, 8, 32];

    for k in cluster_counts.iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let data = Array2::random((n_rows, n_bases), Uniform::new(0.0, 50.0));

            b.iter(|| {
                let matrix = PerBaseMatrix::indexed(data.clone());
                let mut kmeans = SignalKMeans::with_config(matrix, bench_config(k)).unwrap();
                kmeans.run().unwrap();
                black_box(kmeans)
            });
        });
    }
    group.finish();
}

fn benchmark_kmeans_with_missing_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_missing");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_rows = 5_000;
    let n_bases = 200;

    group.bench_function("10pct_nan_rows", |b| {
        let mut data = Array2::random((n_rows, n_bases), Uniform::new(0.0, 50.0));
        for i in (0..n_rows).step_by(10) {
            data[[i, n_bases / 2]] = f64::NAN;
        }

        b.iter(|| {
            let matrix = PerBaseMatrix::indexed(data.clone());
            let mut kmeans = SignalKMeans::with_config(matrix, bench_config(8)).unwrap();
            kmeans.run().unwrap();
            black_box(kmeans)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_kmeans_varying_rows,
    benchmark_kmeans_varying_clusters,
    benchmark_kmeans_with_missing_rows,
);

criterion_main!(benches);
