use ndarray::{ArrayView1, ArrayView2};

/// Squared Euclidean distance between a signal row and a centroid
#[inline]
pub fn squared_euclidean(row: &ArrayView1<f64>, centroid: &ArrayView1<f64>) -> f64 {
    row.iter()
        .zip(centroid.iter())
        .map(|(&x, &c)| {
            let d = x - c;
            d * d
        })
        .sum()
}

/// Find the nearest centroid for a single row
///
/// Centroids are scanned in index order and the running minimum is only
/// replaced on a strictly smaller distance, so ties go to the lowest index.
///
/// # Returns
/// * `(label, distance)` - Index of the closest centroid and its squared distance
pub fn nearest_centroid(row: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_label = 0;
    let mut best_dist = f64::MAX;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_euclidean(row, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    (best_label, best_dist)
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| squared_euclidean(&old_c, &new_c).sqrt())
        .sum()
}
