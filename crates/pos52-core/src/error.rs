//! Error types for the Pos52 library.
//!
//! Only conditions that make the whole computation meaningless are errors.
//! Per-index exclusions (flat windows, missing forward data) are tallied as
//! diagnostics by the analytics crate and never surface here.

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized Result type for Pos52 core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for Pos52 core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The series is too short to produce a trustworthy table.
    #[error("Insufficient history: need at least {required} points, got {actual}")]
    InsufficientHistory {
        /// Minimum number of points (`lookback + horizon + margin`).
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A close that is not a positive finite number.
    #[error("Invalid close on {date}: {value}")]
    InvalidClose {
        /// Date of the offending record.
        date: NaiveDate,
        /// The rejected close.
        value: f64,
    },

    /// Records are not in ascending date order.
    #[error("Series out of order: {next} follows {previous}")]
    UnorderedSeries {
        /// Date of the earlier record.
        previous: NaiveDate,
        /// Date of the record that breaks the ordering.
        next: NaiveDate,
    },

    /// The same trading day appears more than once.
    #[error("Duplicate date in series: {date}")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },

    /// A history source could not be read.
    #[error("IO error on {path}: {reason}")]
    Io {
        /// Path of the source.
        path: String,
        /// Underlying error message.
        reason: String,
    },

    /// A history source could not be decoded as a whole.
    #[error("Parse error in {source_name}: {reason}")]
    Parse {
        /// Name of the source.
        source_name: String,
        /// Underlying error message.
        reason: String,
    },
}

impl CoreError {
    /// Creates an insufficient history error.
    #[must_use]
    pub fn insufficient_history(required: usize, actual: usize) -> Self {
        Self::InsufficientHistory { required, actual }
    }

    /// Creates an IO error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a parse error for the given source.
    #[must_use]
    pub fn parse(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
