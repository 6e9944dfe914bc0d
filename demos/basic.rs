//! Basic example demonstrating signal-kmeans usage
//!
//! Run with: cargo run --example basic --release

use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use signal_kmeans::{ClusterConfig, InMemorySignal, PerBaseMatrix, Region, SignalKMeans, Strand};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== signal-kmeans example ===\n");

    // A synthetic chr1 track with three kinds of sites, every 1 kb:
    // sharp peaks, broad plateaus and background
    let width = 100;
    let n_sites = 30;
    let track_len = n_sites * 1_000 + width;

    let noise = Array2::random((1, track_len), Uniform::new(0.0, 0.5));
    let mut track: Vec<f64> = noise.iter().copied().collect();

    let mut regions = Vec::with_capacity(n_sites + 1);
    for site in 0..n_sites {
        let start = site * 1_000;
        let kind = match site % 3 {
            0 => "peak",
            1 => "plateau",
            _ => "background",
        };
        for (offset, value) in track[start..start + width].iter_mut().enumerate() {
            let from_center = (offset as f64 - width as f64 / 2.0).abs();
            *value += match kind {
                "peak" => (20.0 - from_center).max(0.0),
                "plateau" => 6.0,
                _ => 0.0,
            };
        }
        let strand = if site % 2 == 0 { Strand::Forward } else { Strand::Reverse };
        regions.push(
            Region::new("chr1", start as u64, (start + width) as u64)
                .with_name(kind)
                .with_strand(strand),
        );
    }

    // Runs off the end of the track, so it has missing values
    let off_end = (track_len - width / 2) as u64;
    regions.push(Region::new("chr1", off_end, off_end + width as u64).with_name("off-end"));

    println!("Clustering {} regions of {} bases...\n", regions.len(), width);

    let source = InMemorySignal::new().with_track("chr1", track);
    let matrix = PerBaseMatrix::load(&source, regions).expect("Loading failed");

    let config = ClusterConfig {
        k: 3,
        tol: 1e-6,
        max_iters: Some(1_000),
        verbose: true,
    };

    let mut kmeans = SignalKMeans::with_config(matrix, config).expect("Invalid k");
    kmeans.run().expect("Clustering failed");

    println!("Excluded rows: {}", kmeans.num_excluded());
    println!("Iterations: {} (converged: {})", kmeans.n_iterations(), kmeans.converged());
    println!();

    // Print centroid summaries
    let centroids = kmeans.centroids().unwrap();
    let sizes = kmeans.cluster_sizes().unwrap();
    println!("Centroids:");
    for (i, centroid) in centroids.outer_iter().enumerate() {
        println!(
            "  Cluster {}: {} rows, mean {:.2}, center {:.2}",
            i,
            sizes[i],
            centroid.mean().unwrap_or(0.0),
            centroid[width / 2]
        );
    }
    println!();

    println!("Rows in clustered order:");
    for row in kmeans.matrix().descriptors() {
        println!("  {:>3}  {}  {:?}  {}", row.label(), row.id(), row.id().strand, row.id().name);
    }

    println!("\n=== Done! ===");
}
