//! End-to-end bucket-statistics pipeline.

use pos52_config::{AnalysisConfig, Validate};
use pos52_core::traits::HistoryProvider;
use pos52_core::types::PriceSeries;

use crate::aggregate::aggregate_buckets;
use crate::error::AnalyticsResult;
use crate::position::{current_position, CurrentPosition};
use crate::report::{BucketStatsReport, ReportMeta};
use crate::samples::{collect_samples, SampleSet};

/// Computes bucket statistics for price series under a fixed configuration.
///
/// The pipeline holds no state besides its configuration; running it twice on
/// the same series yields identical reports.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use pos52_analytics::BucketStatsPipeline;
/// use pos52_config::AnalysisConfig;
/// use pos52_core::PriceSeries;
///
/// let config = AnalysisConfig::new().with_lookback(20).with_horizon(5).with_min_samples(1);
/// let pipeline = BucketStatsPipeline::new(config).unwrap();
///
/// let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i % 9)).collect();
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = PriceSeries::from_closes(start, &closes).unwrap();
///
/// let report = pipeline.run(&series).unwrap();
/// assert_eq!(report.buckets.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BucketStatsPipeline {
    config: AnalysisConfig,
}

impl BucketStatsPipeline {
    /// Creates a pipeline, validating the configuration.
    pub fn new(config: AnalysisConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Minimum number of closes a series needs.
    #[must_use]
    pub fn required_history(&self) -> usize {
        self.config.required_history()
    }

    /// Extracts per-day samples after checking the series is long enough.
    pub fn samples(&self, series: &PriceSeries) -> AnalyticsResult<SampleSet> {
        series.ensure_len(self.required_history())?;
        Ok(collect_samples(series, &self.config))
    }

    /// Runs the full computation on a series.
    pub fn run(&self, series: &PriceSeries) -> AnalyticsResult<BucketStatsReport> {
        let SampleSet {
            samples,
            mut diagnostics,
        } = self.samples(series)?;

        let aggregation = aggregate_buckets(&samples, &self.config.bucket_edges, self.config.min_samples);
        diagnostics.out_of_range = aggregation.out_of_range;

        let report = BucketStatsReport {
            meta: ReportMeta {
                lookback: self.config.lookback,
                horizon: self.config.horizon,
                min_samples: self.config.min_samples,
                margin: self.config.margin,
                sample_total: samples.len(),
                asof: series.last_date(),
            },
            buckets: aggregation.buckets,
            diagnostics,
        };

        log::info!(
            "bucket stats over {} closes: {} samples, {} bucketed",
            series.len(),
            report.meta.sample_total,
            report.bucketed_total()
        );
        Ok(report)
    }

    /// Loads a history from `provider` and runs the computation on it.
    ///
    /// Records the provider skipped are logged as warnings.
    pub fn run_provider(&self, provider: &dyn HistoryProvider) -> AnalyticsResult<BucketStatsReport> {
        let load = provider.load()?;
        for skipped in &load.skipped {
            log::warn!("{}: skipped {} ({})", provider.name(), skipped.origin, skipped.reason);
        }
        log::debug!(
            "{} supplied {} closes, {} records skipped",
            provider.name(),
            load.series.len(),
            load.skipped.len()
        );
        self.run(&load.series)
    }

    /// Position of the latest close in its trailing window.
    #[must_use]
    pub fn current_position(&self, series: &PriceSeries) -> Option<CurrentPosition> {
        current_position(series, self.config.lookback, &self.config.bucket_edges)
    }
}
