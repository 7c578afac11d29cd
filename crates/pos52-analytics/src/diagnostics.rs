//! Tally of per-day exclusions.
//!
//! None of these are errors. They explain why the number of samples is
//! smaller than the number of days in the series.

use serde::{Deserialize, Serialize};

/// Why a day produced no sample.
///
/// Samples that fall outside every bucket are counted by the aggregation
/// instead, see [`crate::aggregate::BucketAggregation::out_of_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipCause {
    /// The trailing window was flat.
    DegenerateWindow,
    /// The forward horizon runs past the end of the series.
    MissingForwardData,
    /// A ratio produced NaN or infinity.
    NonFinite,
}

/// Counts of excluded days by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDiagnostics {
    /// Days whose trailing window was flat.
    pub degenerate_window: usize,
    /// Days at the tail without a full forward horizon.
    pub missing_forward_data: usize,
    /// Days dropped for a non-finite ratio.
    pub non_finite: usize,
    /// Samples whose position fell outside the bucket range.
    pub out_of_range: usize,
}

impl SkipDiagnostics {
    /// Records one exclusion.
    pub fn record(&mut self, cause: SkipCause) {
        match cause {
            SkipCause::DegenerateWindow => self.degenerate_window += 1,
            SkipCause::MissingForwardData => self.missing_forward_data += 1,
            SkipCause::NonFinite => self.non_finite += 1,
        }
    }

    /// Total number of exclusions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.degenerate_window + self.missing_forward_data + self.non_finite + self.out_of_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut diagnostics = SkipDiagnostics::default();
        diagnostics.record(SkipCause::DegenerateWindow);
        diagnostics.record(SkipCause::DegenerateWindow);
        diagnostics.record(SkipCause::NonFinite);

        assert_eq!(diagnostics.degenerate_window, 2);
        assert_eq!(diagnostics.non_finite, 1);
        assert_eq!(diagnostics.out_of_range, 0);
        assert_eq!(diagnostics.total(), 3);
    }

    #[test]
    fn test_total_includes_out_of_range() {
        let mut diagnostics = SkipDiagnostics {
            out_of_range: 4,
            ..SkipDiagnostics::default()
        };
        diagnostics.record(SkipCause::MissingForwardData);
        assert_eq!(diagnostics.total(), 5);
    }
}
