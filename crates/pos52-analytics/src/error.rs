//! Unified error type for the analytics engine.

use thiserror::Error;

use pos52_config::ConfigError;
use pos52_core::CoreError;

/// Unified error type for all analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Error bubbled up from the core crate (short history, bad series).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The configuration handed to the pipeline is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl AnalyticsError {
    /// Returns true if this is an `InsufficientHistory` error.
    #[must_use]
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, Self::Core(CoreError::InsufficientHistory { .. }))
    }
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
