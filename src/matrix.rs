use crate::error::ClusterError;
use crate::source::{Region, SignalSource};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Label carried by rows that contain at least one `NaN`
pub const EXCLUDED_LABEL: i64 = -1;

/// Per-row metadata, kept in lockstep with the matrix row it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor<T> {
    /// Index of the data row inside the matrix buffer
    row: usize,
    /// 0 until clustered, [`EXCLUDED_LABEL`] for rows with undefined values
    label: i64,
    id: T,
}

impl<T> RowDescriptor<T> {
    /// Buffer row holding this descriptor's data
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn label(&self) -> i64 {
        self.label
    }

    /// Caller-supplied identity of the row
    pub fn id(&self) -> &T {
        &self.id
    }

    pub fn is_excluded(&self) -> bool {
        self.label == EXCLUDED_LABEL
    }
}

/// A per-base signal matrix: one fixed-width row per region.
///
/// The numeric buffer is never moved. Reordering only permutes the row
/// handles (`order`) together with the descriptors, and `order[i]` always
/// equals `descriptors()[i].row()`, so `row(i)` is the data of
/// `descriptor(i)`.
#[derive(Debug, Clone)]
pub struct PerBaseMatrix<T> {
    data: Array2<f64>,
    order: Vec<usize>,
    rows: Vec<RowDescriptor<T>>,
}

impl<T> PerBaseMatrix<T> {
    /// Build a matrix from a row-major buffer and one identity per row.
    ///
    /// # Errors
    ///
    /// Returns an error if `ids.len()` differs from the number of rows.
    pub fn new(data: Array2<f64>, ids: Vec<T>) -> Result<Self, ClusterError> {
        if ids.len() != data.nrows() {
            return Err(ClusterError::InvalidDimensions(format!(
                "Expected {} row identities, got {}",
                data.nrows(),
                ids.len()
            )));
        }

        Ok(Self::from_parts(data, ids))
    }

    fn from_parts(data: Array2<f64>, ids: Vec<T>) -> Self {
        let rows: Vec<RowDescriptor<T>> = ids
            .into_iter()
            .enumerate()
            .map(|(row, id)| RowDescriptor { row, label: 0, id })
            .collect();
        let order = (0..rows.len()).collect();

        Self { data, order, rows }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Data of the row at position `i` in the current order
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.row(self.order[i])
    }

    pub fn descriptor(&self, i: usize) -> &RowDescriptor<T> {
        &self.rows[i]
    }

    pub fn descriptors(&self) -> &[RowDescriptor<T>] {
        &self.rows
    }

    /// Buffer row index for every position, in the current order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Labels in the current row order
    pub fn labels(&self) -> Array1<i64> {
        self.rows.iter().map(|d| d.label).collect()
    }

    /// Copy of the matrix with rows in the current order
    pub fn to_array(&self) -> Array2<f64> {
        self.data.select(Axis(0), &self.order)
    }

    /// Permute rows with a seeded RNG.
    ///
    /// Seeding picks centroids at fixed strides through the row order, so
    /// shuffling before building the engine is how a caller gets a different
    /// (but still reproducible) starting point.
    pub fn shuffle_rows(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pairs = self.take_pairs();
        pairs.shuffle(&mut rng);
        self.restore_pairs(pairs);
    }

    /// Stable sort by label, excluded rows (`-1`) first.
    ///
    /// Sorting an already sorted matrix leaves it unchanged.
    pub fn sort_by_label(&mut self) {
        self.reorder_by_key(|d| d.label);
    }

    /// Label every row holding a `NaN` as excluded and move those rows to
    /// the front, keeping relative order otherwise. Returns how many rows
    /// were excluded.
    pub(crate) fn exclude_undefined_rows(&mut self) -> usize {
        let mut num_excluded = 0;
        for i in 0..self.rows.len() {
            if self.row(i).iter().any(|v| v.is_nan()) {
                self.rows[i].label = EXCLUDED_LABEL;
                num_excluded += 1;
            }
        }
        self.reorder_by_key(|d| !d.is_excluded());
        num_excluded
    }

    pub(crate) fn set_label(&mut self, i: usize, label: i64) {
        self.rows[i].label = label;
    }

    fn reorder_by_key<K: Ord>(&mut self, mut key: impl FnMut(&RowDescriptor<T>) -> K) {
        let mut pairs = self.take_pairs();
        pairs.sort_by_key(|(d, _)| key(d));
        self.restore_pairs(pairs);
    }

    fn take_pairs(&mut self) -> Vec<(RowDescriptor<T>, usize)> {
        let rows = std::mem::take(&mut self.rows);
        let order = std::mem::take(&mut self.order);
        rows.into_iter().zip(order).collect()
    }

    fn restore_pairs(&mut self, pairs: Vec<(RowDescriptor<T>, usize)>) {
        let (rows, handles): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        self.rows = rows;
        // Handles are rebuilt from the descriptors' back-pointers
        self.order = self.rows.iter().map(|d| d.row).collect();
        debug_assert_eq!(handles, self.order);
    }
}

impl PerBaseMatrix<usize> {
    /// Matrix whose row identities are the original row indices
    pub fn indexed(data: Array2<f64>) -> Self {
        let ids = (0..data.nrows()).collect();
        Self::from_parts(data, ids)
    }
}

impl PerBaseMatrix<Region> {
    /// Load one row per region from a signal source.
    ///
    /// # Errors
    ///
    /// Returns an error if the regions differ in width, the matrix would not
    /// fit in memory on this platform, the source fails, or the source
    /// returns the wrong number of values for a region.
    pub fn load<S>(source: &S, regions: Vec<Region>) -> Result<Self, ClusterError>
    where
        S: SignalSource + ?Sized,
    {
        let ncols = match regions.first() {
            Some(region) => region.width()?,
            None => 0,
        };
        let max_elements = isize::MAX as usize / std::mem::size_of::<f64>();
        if regions
            .len()
            .checked_mul(ncols)
            .map_or(true, |total| total > max_elements)
        {
            return Err(ClusterError::InvalidDimensions(format!(
                "{} regions of {} bases exceed the addressable matrix size",
                regions.len(),
                ncols
            )));
        }
        let mut data = Array2::from_elem((regions.len(), ncols), f64::NAN);

        for (i, region) in regions.iter().enumerate() {
            let width = region.width()?;
            if width != ncols {
                return Err(ClusterError::InvalidDimensions(format!(
                    "Region {} spans {} bases, expected {}",
                    region, width, ncols
                )));
            }

            let values = source.per_base(region)?;
            if values.len() != ncols {
                return Err(ClusterError::InvalidDimensions(format!(
                    "Source returned {} values for {}, expected {}",
                    values.len(),
                    region,
                    ncols
                )));
            }
            data.row_mut(i).assign(&ArrayView1::from(&values[..]));
        }

        log::debug!(
            "Loaded per-base matrix: {} regions x {} bases",
            regions.len(),
            ncols
        );

        Self::new(data, regions)
    }
}
