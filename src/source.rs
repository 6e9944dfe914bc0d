//! Row identities and the seam through which per-base signal enters the
//! engine.
//!
//! Reading bigWig/bedGraph files is left to the caller: anything that can
//! answer "what are the per-base values over this region" implements
//! [`SignalSource`], and [`PerBaseMatrix::load`](crate::PerBaseMatrix::load)
//! turns a list of equal-width regions into a matrix.

use crate::error::ClusterError;
use std::collections::HashMap;
use std::fmt;

/// Strand of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

/// A BED6-style genomic interval, half-open `[start, end)`.
///
/// The engine never interprets it; it rides along with its matrix row so the
/// caller can tell which region ended up in which cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub score: i32,
    pub strand: Strand,
}

impl Region {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            name: String::new(),
            score: 0,
            strand: Strand::Unknown,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Width in bases, 0 when `end < start`
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Width as a matrix column count.
    ///
    /// # Errors
    ///
    /// Returns an error if the width does not fit in `usize` on this target.
    pub fn width(&self) -> Result<usize, ClusterError> {
        usize::try_from(self.len()).map_err(|_| {
            ClusterError::InvalidDimensions(format!(
                "Region {} spans {} bases, more than this platform can index",
                self,
                self.len()
            ))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Anything that can produce per-base signal for a region.
pub trait SignalSource {
    /// One value per base of `region`, `NaN` where the source has no data.
    fn per_base(&self, region: &Region) -> Result<Vec<f64>, ClusterError>;
}

/// Per-chromosome signal tracks held in memory, indexed from base 0.
///
/// Bases past the end of a track, and chromosomes without a track, read
/// as `NaN`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySignal {
    tracks: HashMap<String, Vec<f64>>,
}

impl InMemorySignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the track for `chrom`
    pub fn with_track(mut self, chrom: impl Into<String>, values: Vec<f64>) -> Self {
        self.tracks.insert(chrom.into(), values);
        self
    }

    pub fn track(&self, chrom: &str) -> Option<&[f64]> {
        self.tracks.get(chrom).map(Vec::as_slice)
    }
}

impl SignalSource for InMemorySignal {
    fn per_base(&self, region: &Region) -> Result<Vec<f64>, ClusterError> {
        if region.end < region.start {
            return Err(ClusterError::Source(format!(
                "Region {} ends before it starts",
                region
            )));
        }

        let track = self.track(&region.chrom);
        Ok((region.start..region.end)
            .map(|pos| {
                track
                    .zip(usize::try_from(pos).ok())
                    .and_then(|(t, pos)| t.get(pos))
                    .copied()
                    .unwrap_or(f64::NAN)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_len_and_display() {
        let region = Region::new("chr2", 100, 150).with_name("peak_1");
        assert_eq!(region.len(), 50);
        assert_eq!(region.width().unwrap(), 50);
        assert!(!region.is_empty());
        assert_eq!(region.to_string(), "chr2:100-150");
        assert_eq!(region.strand, Strand::Unknown);
        assert_eq!(region.score, 0);

        let region = Region {
            score: 850,
            ..Region::new("chr2", 150, 100).with_strand(Strand::Reverse)
        };
        assert!(region.is_empty());
        assert_eq!(region.width().unwrap(), 0);
        assert_eq!(region.strand, Strand::Reverse);
        assert_eq!(region.score, 850);
        assert_ne!(region.clone().with_strand(Strand::Forward), region);
    }

    #[test]
    fn test_region_width_beyond_u32() {
        let region = Region::new("chr1", 0, u64::from(u32::MAX) + 10);
        assert_eq!(region.len(), u64::from(u32::MAX) + 10);

        #[cfg(target_pointer_width = "32")]
        assert!(matches!(
            region.width(),
            Err(ClusterError::InvalidDimensions(_))
        ));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(region.width().unwrap() as u64, region.len());
    }

    #[test]
    fn test_in_memory_signal_reads_window() {
        let source = InMemorySignal::new().with_track("chr1", vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let values = source.per_base(&Region::new("chr1", 1, 4)).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_in_memory_signal_missing_data_is_nan() {
        let source = InMemorySignal::new().with_track("chr1", vec![5.0, 6.0]);

        let past_end = source.per_base(&Region::new("chr1", 1, 4)).unwrap();
        assert_eq!(past_end[0], 6.0);
        assert!(past_end[1].is_nan());
        assert!(past_end[2].is_nan());

        let unknown = source.per_base(&Region::new("chrX", 0, 3)).unwrap();
        assert_eq!(unknown.len(), 3);
        assert!(unknown.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_in_memory_signal_inverted_region() {
        let source = InMemorySignal::new();
        let result = source.per_base(&Region::new("chr1", 10, 5));
        assert!(matches!(result, Err(ClusterError::Source(_))));
    }
}
