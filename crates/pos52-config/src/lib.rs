//! Pos52 Configuration Layer
//!
//! Run settings for the bucket-statistics pipeline. A configuration is an
//! explicit value handed to the pipeline at construction time; nothing is read
//! from process-wide state.
//!
//! # Example
//!
//! ```rust
//! use pos52_config::{AnalysisConfig, Validate};
//!
//! let config = AnalysisConfig::new().with_lookback(126).with_min_samples(10);
//! assert!(config.is_valid());
//! assert_eq!(config.required_history(), 126 + 63 + 5);
//!
//! let from_file = AnalysisConfig::from_toml_str("horizon = 21").unwrap();
//! assert_eq!(from_file.horizon, 21);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analysis;
mod error;

pub use analysis::{
    AnalysisConfig, DEFAULT_HORIZON, DEFAULT_LOOKBACK, DEFAULT_MIN_SAMPLES, MIN_MARGIN,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
