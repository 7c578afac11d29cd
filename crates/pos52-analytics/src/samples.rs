//! Per-day sample extraction.

use pos52_config::AnalysisConfig;
use pos52_core::types::{PriceSeries, Sample};

use crate::diagnostics::{SkipCause, SkipDiagnostics};
use crate::outcome::{forward_minima, forward_outcome, ForwardOutcome};
use crate::parallel::maybe_parallel_map;
use crate::position::{trailing_positions, Position};

/// Samples extracted from one series, with the days that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    /// Valid samples in ascending index order.
    pub samples: Vec<Sample>,
    /// Days excluded before bucketing.
    pub diagnostics: SkipDiagnostics,
}

impl SampleSet {
    /// Number of valid samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no day produced a sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Extracts a sample for every day `i` in `lookback..len`.
///
/// Days with a flat trailing window, without a full forward horizon, or with a
/// non-finite ratio are counted in the diagnostics instead. The series length
/// is not checked here; callers that need the minimum-history guarantee go
/// through [`crate::BucketStatsPipeline`].
#[must_use]
pub fn collect_samples(series: &PriceSeries, config: &AnalysisConfig) -> SampleSet {
    let closes = series.closes();
    let lookback = config.lookback;
    let horizon = config.horizon;

    let positions = trailing_positions(closes, lookback);
    let minima = forward_minima(closes, horizon);

    let days: Vec<usize> = (lookback..closes.len()).collect();
    let evaluated = maybe_parallel_map(&days, config, |&i| {
        // An empty window (zero lookback) has no entry and counts as flat.
        let position = match positions.get(i - lookback) {
            Some(Position::Defined(value)) => *value,
            Some(Position::NonFinite) => return Err(SkipCause::NonFinite),
            Some(Position::Degenerate) | None => return Err(SkipCause::DegenerateWindow),
        };
        let Some(&forward_min) = minima.get(i) else {
            return Err(SkipCause::MissingForwardData);
        };
        let outcome = forward_outcome(closes[i], closes[i + horizon], forward_min)
            .ok_or(SkipCause::NonFinite)?;
        Ok((position, outcome))
    });

    let mut set = SampleSet::default();
    for (&index, result) in days.iter().zip(evaluated) {
        match result {
            Ok((position, ForwardOutcome { return_pct, drawdown_pct })) => {
                set.samples.push(Sample {
                    index,
                    date: series.points()[index].date,
                    position,
                    forward_return_pct: return_pct,
                    forward_drawdown_pct: drawdown_pct,
                });
            }
            Err(cause) => set.diagnostics.record(cause),
        }
    }

    log::debug!(
        "collected {} samples from {} closes ({} skipped)",
        set.len(),
        closes.len(),
        set.diagnostics.total()
    );
    set
}
