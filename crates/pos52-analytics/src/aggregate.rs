//! Bucket aggregation.
//!
//! Samples are grouped by the bucket their position falls in. Samples outside
//! every bucket (position below 0 or above 100) are dropped and counted, never
//! clamped into the nearest band. All aggregation runs in sample order, so the
//! floating-point sums are reproducible.

use serde::{Deserialize, Serialize};

use pos52_core::rounding::round_half_away;
use pos52_core::types::{locate_bucket, BucketSpec, Sample};

/// Decimal places for return and drawdown figures.
pub const PCT_DECIMALS: u32 = 2;

/// Decimal places for the win rate.
pub const WIN_RATE_DECIMALS: u32 = 1;

/// Summary statistics for one position bucket.
///
/// `sample_size` is always the true member count. The aggregate fields are
/// `None` when the bucket holds fewer than `min_samples` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Bucket identifier; serialised as the map key of the report.
    #[serde(skip)]
    pub name: String,

    /// `[lower, upper]` position bounds.
    pub range: [f64; 2],

    /// Number of samples in the bucket.
    pub sample_size: usize,

    /// Mean forward return, percent.
    pub avg_forward_return_pct: Option<f64>,

    /// Mean forward drawdown, percent.
    pub avg_drawdown_pct: Option<f64>,

    /// Most negative forward drawdown, percent.
    pub worst_drawdown_pct: Option<f64>,

    /// Share of samples with a positive forward return, percent.
    pub win_rate_pct: Option<f64>,
}

impl BucketStats {
    /// Creates a bucket with a count but no aggregates.
    #[must_use]
    pub fn unreported(spec: &BucketSpec, sample_size: usize) -> Self {
        Self {
            name: spec.name.clone(),
            range: spec.range(),
            sample_size,
            avg_forward_return_pct: None,
            avg_drawdown_pct: None,
            worst_drawdown_pct: None,
            win_rate_pct: None,
        }
    }

    /// Returns true if aggregates were reported for this bucket.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.avg_forward_return_pct.is_some()
    }
}

/// Output of [`aggregate_buckets`].
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAggregation {
    /// One entry per configured bucket, in configured order.
    pub buckets: Vec<BucketStats>,
    /// Samples that matched no bucket.
    pub out_of_range: usize,
}

impl BucketAggregation {
    /// Total samples placed in a bucket.
    #[must_use]
    pub fn bucketed_total(&self) -> usize {
        self.buckets.iter().map(|b| b.sample_size).sum()
    }
}

/// Groups samples into buckets and summarises each one.
///
/// Buckets with fewer than `min_samples` members (and empty buckets, whatever
/// the threshold) are reported with their count and `None` aggregates.
#[must_use]
pub fn aggregate_buckets(
    samples: &[Sample],
    buckets: &[BucketSpec],
    min_samples: usize,
) -> BucketAggregation {
    let mut members: Vec<Vec<&Sample>> = vec![Vec::new(); buckets.len()];
    let mut out_of_range = 0;

    for sample in samples {
        match locate_bucket(buckets, sample.position) {
            Some(i) => members[i].push(sample),
            None => out_of_range += 1,
        }
    }

    let threshold = min_samples.max(1);
    let stats = buckets
        .iter()
        .zip(&members)
        .map(|(spec, group)| {
            if group.len() < threshold {
                BucketStats::unreported(spec, group.len())
            } else {
                summarize(spec, group)
            }
        })
        .collect();

    BucketAggregation {
        buckets: stats,
        out_of_range,
    }
}

fn summarize(spec: &BucketSpec, group: &[&Sample]) -> BucketStats {
    let count = group.len() as f64;

    let return_sum: f64 = group.iter().map(|s| s.forward_return_pct).sum();
    let drawdown_sum: f64 = group.iter().map(|s| s.forward_drawdown_pct).sum();
    let worst = group
        .iter()
        .map(|s| s.forward_drawdown_pct)
        .fold(f64::INFINITY, f64::min);
    let wins = group.iter().filter(|s| s.is_win()).count() as f64;

    BucketStats {
        name: spec.name.clone(),
        range: spec.range(),
        sample_size: group.len(),
        avg_forward_return_pct: round_half_away(return_sum / count, PCT_DECIMALS),
        avg_drawdown_pct: round_half_away(drawdown_sum / count, PCT_DECIMALS),
        worst_drawdown_pct: round_half_away(worst, PCT_DECIMALS),
        win_rate_pct: round_half_away(wins / count * 100.0, WIN_RATE_DECIMALS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(index: usize, position: f64, ret: f64, dd: f64) -> Sample {
        Sample {
            index,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(index as u64),
            position,
            forward_return_pct: ret,
            forward_drawdown_pct: dd,
        }
    }

    #[test]
    fn test_groups_by_position() {
        let samples = vec![
            sample(0, 10.0, 1.0, -1.0),
            sample(1, 50.0, 2.0, -2.0),
            sample(2, 80.0, -1.0, -3.0),
            sample(3, 95.0, -2.0, -4.0),
            sample(4, 100.0, 4.0, 0.0),
        ];
        let agg = aggregate_buckets(&samples, &BucketSpec::standard(), 1);

        let sizes: Vec<_> = agg.buckets.iter().map(|b| b.sample_size).collect();
        assert_eq!(sizes, vec![1, 1, 1, 2]);
        assert_eq!(agg.out_of_range, 0);
        assert_eq!(agg.bucketed_total(), 5);

        let top = &agg.buckets[3];
        assert_eq!(top.name, "p90_100");
        assert_eq!(top.range, [90.0, 100.0]);
        assert_eq!(top.avg_forward_return_pct, Some(1.0));
        assert_eq!(top.avg_drawdown_pct, Some(-2.0));
        assert_eq!(top.worst_drawdown_pct, Some(-4.0));
        assert_eq!(top.win_rate_pct, Some(50.0));
    }

    #[test]
    fn test_out_of_range_dropped_not_clamped() {
        let samples = vec![
            sample(0, -5.0, 1.0, -1.0),
            sample(1, 105.0, 1.0, -1.0),
            sample(2, 100.0, 1.0, -1.0),
        ];
        let agg = aggregate_buckets(&samples, &BucketSpec::standard(), 1);

        assert_eq!(agg.out_of_range, 2);
        assert_eq!(agg.buckets[0].sample_size, 0);
        assert_eq!(agg.buckets[3].sample_size, 1);
    }

    #[test]
    fn test_min_samples_hides_aggregates() {
        let samples: Vec<_> = (0..3).map(|i| sample(i, 50.0, 1.0, -1.0)).collect();
        let agg = aggregate_buckets(&samples, &BucketSpec::standard(), 4);

        let mid = &agg.buckets[1];
        assert_eq!(mid.sample_size, 3);
        assert!(!mid.is_reported());
        assert_eq!(mid.worst_drawdown_pct, None);
        assert_eq!(mid.win_rate_pct, None);
    }

    #[test]
    fn test_empty_bucket_is_null_even_with_zero_threshold() {
        let agg = aggregate_buckets(&[], &BucketSpec::standard(), 0);
        assert_eq!(agg.buckets.len(), 4);
        for bucket in &agg.buckets {
            assert_eq!(bucket.sample_size, 0);
            assert!(!bucket.is_reported());
        }
    }

    #[test]
    fn test_rounding_of_mean_return() {
        let agg = aggregate_buckets(
            &[sample(0, 20.0, 1.005, 0.0), sample(1, 20.0, 1.005, 0.0)],
            &BucketSpec::standard(),
            1,
        );
        assert_eq!(agg.buckets[0].avg_forward_return_pct, Some(1.01));

        let agg = aggregate_buckets(&[sample(0, 20.0, 1.015, 0.0)], &BucketSpec::standard(), 1);
        assert_eq!(agg.buckets[0].avg_forward_return_pct, Some(1.02));
    }

    #[test]
    fn test_win_rate_rounding_and_zero_return() {
        let samples = vec![
            sample(0, 40.0, 1.0, -1.0),
            sample(1, 40.0, 0.0, -1.0),
            sample(2, 40.0, 2.0, -1.0),
        ];
        let agg = aggregate_buckets(&samples, &BucketSpec::standard(), 1);
        // A flat return is not a win.
        assert_eq!(agg.buckets[1].win_rate_pct, Some(66.7));
    }

    #[test]
    fn test_worst_drawdown_is_minimum_not_mean() {
        let samples = vec![
            sample(0, 75.0, 3.0, -0.5),
            sample(1, 75.0, 3.0, -12.345),
            sample(2, 75.0, 3.0, -2.0),
        ];
        let agg = aggregate_buckets(&samples, &BucketSpec::standard(), 1);
        let bucket = &agg.buckets[2];
        assert_eq!(bucket.worst_drawdown_pct, Some(-12.35));
        assert_eq!(bucket.avg_drawdown_pct, Some(-4.95));
    }

    #[test]
    fn test_custom_edges() {
        let edges = vec![BucketSpec::new("low", 0.0, 50.0), BucketSpec::new("high", 50.0, 100.0)];
        let samples = vec![sample(0, 50.0, 1.0, 0.0), sample(1, 100.0, 1.0, 0.0)];
        let agg = aggregate_buckets(&samples, &edges, 1);

        assert_eq!(agg.buckets[0].sample_size, 0);
        assert_eq!(agg.buckets[1].sample_size, 2);
    }
}
