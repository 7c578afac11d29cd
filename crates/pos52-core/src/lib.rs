//! # Pos52 Core
//!
//! Core types, traits, and abstractions for 52-week positional bucket statistics.
//!
//! This crate provides the foundational building blocks used throughout Pos52:
//!
//! - **Types**: `PricePoint`, the validated `PriceSeries`, derived `Sample`s and
//!   the `BucketSpec` position bands
//! - **Traits**: The `HistoryProvider` seam through which price histories enter
//!   the pipeline
//! - **Rounding**: Decimal-exact half-away-from-zero rounding for report values
//!
//! ## Example
//!
//! ```rust
//! use pos52_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let series = PriceSeries::new(vec![
//!     PricePoint::new(d(2), 10.0),
//!     PricePoint::new(d(3), 10.5),
//! ])
//! .unwrap();
//!
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.last_date(), Some(d(3)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod rounding;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rounding::round_half_away;
    pub use crate::traits::{HistoryLoad, HistoryProvider, SkipReason, SkippedRecord};
    pub use crate::types::{BucketSpec, PricePoint, PriceSeries, Sample};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{BucketSpec, PricePoint, PriceSeries, Sample};
