/// Configuration for the signal k-means engine
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Number of clusters
    pub k: usize,

    /// Convergence tolerance. The run stops once the change in total error
    /// (sum of squared distances) between two iterations is at most `tol`.
    /// A negative value never converges and runs until `max_iters`.
    pub tol: f64,

    /// Iteration cap. `None` loops until the tolerance is met.
    pub max_iters: Option<usize>,

    /// Log every iteration at info level
    pub verbose: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 8,
            tol: 1e-4,
            max_iters: Some(10_000),
            verbose: false,
        }
    }
}

impl ClusterConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iters(mut self, max_iters: Option<usize>) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
