//! Position bands.
//!
//! A bucket set is an ordered, contiguous list of half-open bands covering
//! `[0, 100]`. The final band also includes its upper bound, so a close exactly
//! at the trailing high (position 100) lands in the top band.

use serde::{Deserialize, Serialize};

/// Lowest position covered by a bucket set.
pub const POSITION_FLOOR: f64 = 0.0;

/// Highest position covered by a bucket set.
pub const POSITION_CEILING: f64 = 100.0;

/// A named position band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    /// Stable identifier such as `p90_100`.
    pub name: String,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound; exclusive unless the bucket is the last of its set.
    pub upper: f64,
}

impl BucketSpec {
    /// Creates a new bucket specification.
    #[must_use]
    pub fn new(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    /// The standard bands: `[0,35)`, `[35,70)`, `[70,90)`, `[90,100]`.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("p0_35", 0.0, 35.0),
            Self::new("p35_70", 35.0, 70.0),
            Self::new("p70_90", 70.0, 90.0),
            Self::new("p90_100", 90.0, 100.0),
        ]
    }

    /// Returns true if `position` falls in this band.
    ///
    /// `inclusive_upper` is set for the last band of a set.
    #[must_use]
    pub fn contains(&self, position: f64, inclusive_upper: bool) -> bool {
        if position < self.lower {
            return false;
        }
        if inclusive_upper {
            position <= self.upper
        } else {
            position < self.upper
        }
    }

    /// The band as `[lower, upper]`.
    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}

/// Index of the bucket in `buckets` that contains `position`.
///
/// Positions outside the covered range (and NaN) match nothing.
#[must_use]
pub fn locate_bucket(buckets: &[BucketSpec], position: f64) -> Option<usize> {
    let last = buckets.len().checked_sub(1)?;
    buckets
        .iter()
        .enumerate()
        .position(|(i, bucket)| bucket.contains(position, i == last))
}
