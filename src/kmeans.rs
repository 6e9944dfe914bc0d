use crate::algorithm::{kmeans_fixed_stride, validate_k};
use crate::config::ClusterConfig;
use crate::error::ClusterError;
use crate::matrix::PerBaseMatrix;
use crate::source::{Region, SignalSource};
use ndarray::{Array1, Array2};

/// K-means engine over a per-base signal matrix.
///
/// The engine owns the matrix. Construction moves rows containing `NaN` to
/// the front and labels them `-1`; [`run`](Self::run) labels the remaining
/// rows and stably sorts the whole matrix by label, so a caller reading
/// [`matrix`](Self::matrix) afterwards sees excluded rows first and then
/// each cluster as a contiguous block.
///
/// Seeding is deterministic, so the same matrix, k and tolerance always give
/// the same labels and centroids.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use signal_kmeans::{PerBaseMatrix, SignalKMeans};
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
/// let mut kmeans = SignalKMeans::from_matrix(PerBaseMatrix::indexed(data), 2).unwrap();
/// kmeans.run_with_tolerance(1e-6).unwrap();
///
/// assert_eq!(kmeans.matrix().labels().to_vec(), vec![0, 0, 1, 1]);
/// assert_eq!(kmeans.cluster_sizes().unwrap().to_vec(), vec![2, 2]);
/// ```
#[derive(Debug)]
pub struct SignalKMeans<T = Region> {
    /// Model configuration
    config: ClusterConfig,

    matrix: PerBaseMatrix<T>,

    /// Rows holding undefined values, all at the front of the matrix
    num_excluded: usize,

    /// Centroids of the last run (None before the first run)
    centroids: Option<Array2<f64>>,

    cluster_sizes: Option<Array1<usize>>,

    n_iterations: usize,
    error: Option<f64>,
    converged: bool,
}

impl<T> SignalKMeans<T> {
    /// Take ownership of a matrix and prepare it for `k` clusters with the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is 0 or larger than the number of rows
    /// without undefined values.
    pub fn from_matrix(matrix: PerBaseMatrix<T>, k: usize) -> Result<Self, ClusterError> {
        Self::with_config(matrix, ClusterConfig::new(k))
    }

    /// Take ownership of a matrix with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.k` is 0 or larger than the number of rows
    /// without undefined values.
    pub fn with_config(
        mut matrix: PerBaseMatrix<T>,
        config: ClusterConfig,
    ) -> Result<Self, ClusterError> {
        let num_excluded = matrix.exclude_undefined_rows();
        validate_k(config.k, matrix.nrows() - num_excluded)?;

        log::debug!(
            "Prepared {} x {} matrix for k = {} ({} rows excluded for undefined values)",
            matrix.nrows(),
            matrix.ncols(),
            config.k,
            num_excluded
        );

        Ok(Self {
            config,
            matrix,
            num_excluded,
            centroids: None,
            cluster_sizes: None,
            n_iterations: 0,
            error: None,
            converged: false,
        })
    }

    /// Cluster the active rows with the configured tolerance, write the labels
    /// onto the row descriptors and sort the matrix by label.
    pub fn run(&mut self) -> Result<(), ClusterError> {
        let result = kmeans_fixed_stride(&self.matrix, self.num_excluded, &self.config)?;

        for i in self.num_excluded..self.matrix.nrows() {
            self.matrix.set_label(i, result.labels[i]);
        }
        self.matrix.sort_by_label();

        self.centroids = Some(result.centroids);
        self.cluster_sizes = Some(result.cluster_sizes);
        self.n_iterations = result.n_iterations;
        self.error = Some(result.error);
        self.converged = result.converged;
        Ok(())
    }

    /// Set the tolerance, then [`run`](Self::run).
    pub fn run_with_tolerance(&mut self, tol: f64) -> Result<(), ClusterError> {
        self.config.tol = tol;
        self.run()
    }

    /// The matrix in its current order
    pub fn matrix(&self) -> &PerBaseMatrix<T> {
        &self.matrix
    }

    /// Release the engine and hand the (reordered) matrix back
    pub fn into_matrix(self) -> PerBaseMatrix<T> {
        self.matrix
    }

    /// Number of rows excluded for holding undefined values
    pub fn num_excluded(&self) -> usize {
        self.num_excluded
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Number of rows, excluded ones included
    pub fn n(&self) -> usize {
        self.matrix.nrows()
    }

    /// Row width
    pub fn m(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.centroids.as_ref()
    }

    pub fn cluster_sizes(&self) -> Option<&Array1<usize>> {
        self.cluster_sizes.as_ref()
    }

    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Sum of squared distances of the last iteration of the last run
    pub fn error(&self) -> Option<f64> {
        self.error
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

impl SignalKMeans<Region> {
    /// Load one row per region from `source`, then prepare for `k` clusters.
    ///
    /// # Errors
    ///
    /// Propagates loading errors, and fails like
    /// [`from_matrix`](Self::from_matrix) on an invalid `k`.
    pub fn from_source<S>(source: &S, regions: Vec<Region>, k: usize) -> Result<Self, ClusterError>
    where
        S: SignalSource + ?Sized,
    {
        let matrix = PerBaseMatrix::load(source, regions)?;
        Self::from_matrix(matrix, k)
    }
}
