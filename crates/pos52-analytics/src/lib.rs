//! # Pos52 Analytics
//!
//! The positional bucket statistics engine.
//!
//! For every day of a daily close series the engine measures where the close
//! sits inside its trailing window (0 = window low, 100 = window high), then
//! records what happened over the following `horizon` days: the realized
//! return and the worst drawdown along the way. Days are grouped into position
//! buckets and each bucket is summarised.
//!
//! ## Modules
//!
//! - [`window`]: O(n) sliding-window minimum and maximum
//! - [`position`]: trailing-window position and the current reading
//! - [`outcome`]: forward return and drawdown
//! - [`samples`]: per-day sample extraction with skip diagnostics
//! - [`aggregate`]: bucket grouping and summary statistics
//! - [`pipeline`]: the end-to-end [`BucketStatsPipeline`]
//!
//! ## Features
//!
//! - `parallel`: evaluate days on rayon for long histories. Results are
//!   identical to the sequential path.
//!
//! ## Example
//!
//! ```rust
//! use pos52_analytics::prelude::*;
//! use chrono::NaiveDate;
//!
//! let config = AnalysisConfig::new().with_lookback(30).with_horizon(10).with_min_samples(1);
//! let pipeline = BucketStatsPipeline::new(config).unwrap();
//!
//! let closes: Vec<f64> = (0..120).map(|i| 50.0 + (f64::from(i) * 0.3).sin() * 5.0).collect();
//! let series = PriceSeries::from_closes(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &closes).unwrap();
//!
//! let report = pipeline.run(&series).unwrap();
//! for bucket in &report.buckets {
//!     println!("{}: {} samples", bucket.name, bucket.sample_size);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod aggregate;
pub mod diagnostics;
pub mod error;
pub mod outcome;
pub mod parallel;
pub mod pipeline;
pub mod position;
pub mod report;
pub mod samples;
pub mod window;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate_buckets, BucketAggregation, BucketStats};
    pub use crate::diagnostics::{SkipCause, SkipDiagnostics};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::pipeline::BucketStatsPipeline;
    pub use crate::position::{current_position, CurrentPosition, Position};
    pub use crate::report::{BucketStatsReport, ReportMeta};
    pub use crate::samples::{collect_samples, SampleSet};

    pub use pos52_config::{AnalysisConfig, Validate};
    pub use pos52_core::prelude::*;
}

pub use aggregate::BucketStats;
pub use error::{AnalyticsError, AnalyticsResult};
pub use pipeline::BucketStatsPipeline;
pub use position::CurrentPosition;
pub use report::{BucketStatsReport, ReportMeta};
