//! Core traits.
//!
//! The pipeline does not know where a price history comes from. Anything that
//! can produce an ascending, duplicate-free `PriceSeries` implements
//! [`HistoryProvider`]; file, database, and API backends are all valid.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::PriceSeries;

/// Why a raw input record was left out of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The record could not be decoded.
    ParseError(String),
    /// The record has no close.
    MissingClose,
    /// The record's date label could not be read.
    InvalidDate(String),
    /// The close is zero, negative, or not finite.
    InvalidClose(f64),
    /// Another record already supplied this date.
    DuplicateDate(NaiveDate),
}

impl SkipReason {
    /// Short stable label for tallies and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "parse_error",
            Self::MissingClose => "missing_close",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidClose(_) => "invalid_close",
            Self::DuplicateDate(_) => "duplicate_date",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "parse error: {msg}"),
            Self::MissingClose => write!(f, "missing close"),
            Self::InvalidDate(raw) => write!(f, "invalid date '{raw}'"),
            Self::InvalidClose(value) => write!(f, "invalid close {value}"),
            Self::DuplicateDate(date) => write!(f, "duplicate date {date}"),
        }
    }
}

/// A raw record that did not make it into the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Where the record came from (file name, row number, ...).
    pub origin: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl SkippedRecord {
    /// Creates a new skipped record.
    #[must_use]
    pub fn new(origin: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            origin: origin.into(),
            reason,
        }
    }
}

/// The result of loading a history: the usable series plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct HistoryLoad {
    /// The validated series.
    pub series: PriceSeries,
    /// Records left out, in the order they were encountered.
    pub skipped: Vec<SkippedRecord>,
}

impl HistoryLoad {
    /// Creates a load result with no skipped records.
    #[must_use]
    pub fn clean(series: PriceSeries) -> Self {
        Self {
            series,
            skipped: Vec::new(),
        }
    }

    /// Number of skipped records whose reason has the given label.
    #[must_use]
    pub fn skipped_with(&self, label: &str) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason.label() == label)
            .count()
    }
}

/// Supplies the daily price history for a single security.
pub trait HistoryProvider {
    /// Human-readable name of the source, used in logs.
    fn name(&self) -> String;

    /// Loads the full history.
    ///
    /// Individual bad records are reported in [`HistoryLoad::skipped`]; only a
    /// source that cannot be read at all is an error.
    fn load(&self) -> CoreResult<HistoryLoad>;
}
