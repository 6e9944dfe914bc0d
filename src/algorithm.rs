use crate::config::ClusterConfig;
use crate::distance::{compute_centroid_shift, nearest_centroid};
use crate::error::ClusterError;
use crate::matrix::{PerBaseMatrix, EXCLUDED_LABEL};
use ndarray::{Array1, Array2, Zip};
use std::time::Instant;

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub centroids: Array2<f64>,
    pub cluster_sizes: Array1<usize>,
    /// One label per row position; excluded positions hold `-1`
    pub labels: Array1<i64>,
    pub n_iterations: usize,
    /// Sum of squared distances of the last iteration
    pub error: f64,
    /// False when the iteration cap stopped the run
    pub converged: bool,
}

/// Check that `k` clusters can be seeded from `n_active` usable rows
pub fn validate_k(k: usize, n_active: usize) -> Result<(), ClusterError> {
    if k == 0 {
        return Err(ClusterError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_active < k {
        return Err(ClusterError::InsufficientData(format!(
            "Number of usable rows ({}) is less than k ({})",
            n_active, k
        )));
    }

    Ok(())
}

/// Run Lloyd's k-means over the active rows `[num_excluded, n)` of a matrix
///
/// Centroids are seeded at fixed strides through the active rows. The loop
/// stops when the total error changes by at most `config.tol` between two
/// iterations, or when `config.max_iters` is reached. At least one
/// iteration always runs.
pub fn kmeans_fixed_stride<T>(
    matrix: &PerBaseMatrix<T>,
    num_excluded: usize,
    config: &ClusterConfig,
) -> Result<KMeansResult, ClusterError> {
    let n = matrix.nrows();
    let m = matrix.ncols();
    let k = config.k;

    validate_k(k, n.saturating_sub(num_excluded))?;

    if config.tol.is_nan() {
        return Err(ClusterError::InvalidTolerance(config.tol));
    }

    if config.verbose {
        log::info!(
            "Clustering {} rows ({} excluded), {} columns, {} clusters",
            n - num_excluded,
            num_excluded,
            m,
            k
        );
    }

    let mut centroids = initialize_centroids(matrix, num_excluded, k);

    let mut labels = Array1::from_elem(n, EXCLUDED_LABEL);
    let mut cluster_sums: Array2<f64> = Array2::zeros((k, m));
    let mut cluster_sizes: Array1<usize> = Array1::zeros(k);

    let mut error = f64::MAX;
    let mut n_iterations = 0;
    let converged = loop {
        let iter_start = Instant::now();
        n_iterations += 1;

        let prev_error = error;
        error = 0.0;
        cluster_sums.fill(0.0);
        cluster_sizes.fill(0);

        for h in num_excluded..n {
            let row = matrix.row(h);
            let (label, dist) = nearest_centroid(&row, &centroids.view());

            labels[h] = label as i64;
            let mut sum = cluster_sums.row_mut(label);
            sum += &row;
            cluster_sizes[label] += 1;
            error += dist;
        }

        let prev_centroids = config.verbose.then(|| centroids.clone());
        update_centroids(&mut centroids, &cluster_sums, &cluster_sizes);

        if let Some(prev_centroids) = prev_centroids {
            let shift = compute_centroid_shift(&prev_centroids.view(), &centroids.view());
            log::info!(
                "  Iteration {}: error = {:.6}, shift = {:.6}, time = {:.4}s",
                n_iterations,
                error,
                shift,
                iter_start.elapsed().as_secs_f64()
            );
        }

        // Keep going only while the change is known to exceed tol. An infinite
        // total error gives a NaN change (inf - inf), which stops the run.
        let delta = (error - prev_error).abs();
        #[allow(clippy::nonminimal_bool)]
        if !(delta > config.tol) {
            log::debug!(
                "Converged after {} iterations (error {:.6}, tol {:.6})",
                n_iterations,
                error,
                config.tol
            );
            break true;
        }

        if config.max_iters.is_some_and(|max| n_iterations >= max) {
            log::warn!(
                "Stopped after {} iterations without converging (error change {:.6} > tol {:.6})",
                n_iterations,
                delta,
                config.tol
            );
            break false;
        }
    };

    Ok(KMeansResult {
        centroids,
        cluster_sizes,
        labels,
        n_iterations,
        error,
        converged,
    })
}

/// Seed centroid `i` with the row at `num_excluded + i * ((n - num_excluded) / k)`
///
/// When k does not divide the active row count the picks are not evenly
/// spread over the tail of the range.
fn initialize_centroids<T>(matrix: &PerBaseMatrix<T>, num_excluded: usize, k: usize) -> Array2<f64> {
    let stride = (matrix.nrows() - num_excluded) / k;

    let mut centroids = Array2::zeros((k, matrix.ncols()));
    for (i, mut centroid) in centroids.outer_iter_mut().enumerate() {
        centroid.assign(&matrix.row(num_excluded + i * stride));
    }

    centroids
}

/// Replace each centroid by the mean of its members.
///
/// A cluster without members takes its accumulator as is, which is the zero
/// vector. It is not re-seeded.
fn update_centroids(
    centroids: &mut Array2<f64>,
    cluster_sums: &Array2<f64>,
    cluster_sizes: &Array1<usize>,
) {
    for ((mut centroid, sum), &size) in centroids
        .outer_iter_mut()
        .zip(cluster_sums.outer_iter())
        .zip(cluster_sizes.iter())
    {
        let divisor = if size > 0 { size as f64 } else { 1.0 };
        Zip::from(&mut centroid)
            .and(&sum)
            .for_each(|c, &s| *c = s / divisor);
    }
}
