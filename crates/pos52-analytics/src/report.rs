//! The bucket-statistics report.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::aggregate::BucketStats;
use crate::diagnostics::SkipDiagnostics;

/// Run parameters and totals echoed in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    /// Trailing window length.
    pub lookback: usize,
    /// Forward horizon length.
    pub horizon: usize,
    /// Minimum bucket size for reported aggregates.
    pub min_samples: usize,
    /// Extra history required beyond `lookback + horizon`.
    pub margin: usize,
    /// Number of valid samples, including those outside every bucket.
    pub sample_total: usize,
    /// Date of the last close in the series.
    pub asof: Option<NaiveDate>,
}

/// Aggregated forward outcomes per position bucket.
///
/// Serialises as
/// `{"meta": {..}, "buckets": {"p0_35": {..}, ..}, "diagnostics": {..}}`
/// with buckets keyed by name in configured order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStatsReport {
    /// Run parameters and totals.
    pub meta: ReportMeta,
    /// One entry per configured bucket, always present.
    #[serde(serialize_with = "serialize_buckets")]
    pub buckets: Vec<BucketStats>,
    /// Days excluded before or during bucketing.
    pub diagnostics: SkipDiagnostics,
}

impl BucketStatsReport {
    /// Looks up a bucket by name.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<&BucketStats> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Number of samples placed in some bucket.
    #[must_use]
    pub fn bucketed_total(&self) -> usize {
        self.buckets.iter().map(|b| b.sample_size).sum()
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_buckets<S>(buckets: &[BucketStats], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(buckets.len()))?;
    for bucket in buckets {
        map.serialize_entry(&bucket.name, bucket)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos52_core::BucketSpec;

    fn report() -> BucketStatsReport {
        let mut buckets: Vec<BucketStats> = BucketSpec::standard()
            .iter()
            .map(|spec| BucketStats::unreported(spec, 0))
            .collect();
        buckets[1] = BucketStats {
            sample_size: 25,
            avg_forward_return_pct: Some(2.5),
            avg_drawdown_pct: Some(-3.1),
            worst_drawdown_pct: Some(-9.87),
            win_rate_pct: Some(64.0),
            ..buckets[1].clone()
        };

        BucketStatsReport {
            meta: ReportMeta {
                lookback: 252,
                horizon: 63,
                min_samples: 20,
                margin: 5,
                sample_total: 26,
                asof: NaiveDate::from_ymd_opt(2025, 6, 30),
            },
            buckets,
            diagnostics: SkipDiagnostics {
                out_of_range: 1,
                ..SkipDiagnostics::default()
            },
        }
    }

    #[test]
    fn test_bucket_lookup() {
        let report = report();
        assert_eq!(report.bucket("p35_70").unwrap().sample_size, 25);
        assert!(report.bucket("p100_200").is_none());
        assert_eq!(report.bucketed_total(), 25);
    }

    #[test]
    fn test_json_layout() {
        let value = serde_json::to_value(report()).unwrap();

        assert_eq!(value["meta"]["lookback"], 252);
        assert_eq!(value["meta"]["asof"], "2025-06-30");
        assert_eq!(value["meta"]["sample_total"], 26);

        let buckets = value["buckets"].as_object().unwrap();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets["p35_70"]["range"], serde_json::json!([35.0, 70.0]));
        assert_eq!(buckets["p35_70"]["worst_drawdown_pct"], -9.87);
        assert!(buckets["p35_70"].get("name").is_none());
        assert!(buckets["p0_35"]["avg_forward_return_pct"].is_null());
        assert_eq!(buckets["p0_35"]["sample_size"], 0);

        assert_eq!(value["diagnostics"]["out_of_range"], 1);
    }

    #[test]
    fn test_bucket_order_preserved_in_text() {
        let json = report().to_json_pretty().unwrap();
        let positions: Vec<usize> = ["p0_35", "p35_70", "p70_90", "p90_100"]
            .iter()
            .map(|name| json.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
