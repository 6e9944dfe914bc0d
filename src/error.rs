use thiserror::Error;

/// Error types for the signal-kmeans library
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough usable (NaN-free) rows for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Shape mismatch between rows, descriptors or regions
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Tolerance can never be satisfied
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),

    /// A signal source failed to produce values for a region
    #[error("Signal source error: {0}")]
    Source(String),
}
