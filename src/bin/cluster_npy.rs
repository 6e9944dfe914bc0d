//! Cluster the rows of a matrix stored as .npy and write them back grouped
//! by cluster.
//!
//! Rows holding NaN are excluded from clustering and written first.
//! The assignments file is an `(n, 2)` int64 array of
//! `[original_row, label]` in output order (label -1 = excluded).
//!
//! Usage: `cluster-npy <input.npy> <output.npy> <assignments.npy> <k> <tol>`
//!
//! Set `RUST_LOG=debug` to follow the run.

use ndarray::{Array2, Axis};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use signal_kmeans::{ClusterConfig, PerBaseMatrix, SignalKMeans};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 6 {
        eprintln!(
            "Usage: {} <input.npy> <output.npy> <assignments.npy> <k> <tol>",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let assignments_path = &args[3];
    let k: usize = args[4].parse()?;
    let tol: f64 = args[5].parse()?;

    let reader = BufReader::new(File::open(input_path)?);
    let data: Array2<f64> = Array2::read_npy(reader)?;

    log::info!("Loaded matrix: {} rows x {} columns", data.nrows(), data.ncols());

    let config = ClusterConfig::new(k)
        .with_tol(tol)
        .with_verbose(log::log_enabled!(log::Level::Debug));

    let mut kmeans = SignalKMeans::with_config(PerBaseMatrix::indexed(data), config)?;
    kmeans.run()?;

    let sizes = kmeans.cluster_sizes().ok_or("No cluster sizes after clustering")?;
    log::info!(
        "{} iterations ({}), {} rows excluded, cluster sizes {:?}",
        kmeans.n_iterations(),
        if kmeans.converged() { "converged" } else { "hit iteration cap" },
        kmeans.num_excluded(),
        sizes.to_vec()
    );

    let matrix = kmeans.matrix();
    matrix
        .to_array()
        .write_npy(BufWriter::new(File::create(output_path)?))?;

    let original_rows: ndarray::Array1<i64> =
        matrix.descriptors().iter().map(|d| *d.id() as i64).collect();
    let assignments = ndarray::stack(
        Axis(1),
        &[original_rows.view(), matrix.labels().view()],
    )?;
    assignments.write_npy(BufWriter::new(File::create(assignments_path)?))?;

    log::info!("Saved reordered matrix to {}", output_path);
    log::info!("Saved assignments to {}", assignments_path);

    Ok(())
}
