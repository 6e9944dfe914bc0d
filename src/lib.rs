//! # signal-kmeans
//!
//! Deterministic k-means clustering of per-base genomic signal matrices,
//! built on ndarray.
//!
//! Each matrix row is the signal over one fixed-width region. The engine
//! groups rows into k clusters and then stably reorders the matrix so the
//! rows of each cluster are contiguous, the layout heatmap-style plots of
//! signal around a set of regions expect.
//!
//! ## Features
//!
//! - **Deterministic seeding**: initial centroids are picked at fixed strides
//!   through the rows, so identical inputs always give identical clusters
//! - **Missing data**: rows holding any `NaN` are labeled `-1`, kept out of
//!   the clustering and sorted to the top of the matrix
//! - **Stable reordering**: rows keep their relative order within a cluster
//! - **Loader seam**: the [`SignalSource`] trait turns a list of
//!   [`Region`]s into a matrix
//!
//! ## Example
//!
//! ```rust
//! use signal_kmeans::{PerBaseMatrix, SignalKMeans};
//! use ndarray::array;
//!
//! let data = array![
//!     [0.0, 0.0],
//!     [10.0, 10.0],
//!     [f64::NAN, 1.0],
//!     [0.0, 1.0],
//!     [10.0, 11.0],
//! ];
//!
//! let mut kmeans = SignalKMeans::from_matrix(PerBaseMatrix::indexed(data), 2).unwrap();
//! assert_eq!(kmeans.num_excluded(), 1);
//!
//! kmeans.run_with_tolerance(1e-6).unwrap();
//! assert_eq!(kmeans.matrix().labels().to_vec(), vec![-1, 0, 0, 1, 1]);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use signal_kmeans::{ClusterConfig, PerBaseMatrix, SignalKMeans};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((500, 40), Uniform::new(0.0, 10.0));
//!
//! let config = ClusterConfig {
//!     k: 5,
//!     tol: 1e-6,
//!     max_iters: Some(500),
//!     verbose: false,
//! };
//!
//! let mut matrix = PerBaseMatrix::indexed(data);
//! matrix.shuffle_rows(42); // change the deterministic seeding
//!
//! let mut kmeans = SignalKMeans::with_config(matrix, config).unwrap();
//! kmeans.run().unwrap();
//! assert_eq!(kmeans.centroids().unwrap().nrows(), 5);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod matrix;
mod source;

pub use config::ClusterConfig;
pub use error::ClusterError;
pub use kmeans::SignalKMeans;
pub use matrix::{PerBaseMatrix, RowDescriptor, EXCLUDED_LABEL};
pub use source::{InMemorySignal, Region, SignalSource, Strand};
