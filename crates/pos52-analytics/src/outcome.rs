//! Forward outcomes: realized return and worst drawdown over a fixed horizon.

use crate::window::SlidingExtrema;

/// What happened after a close over the forward horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardOutcome {
    /// `(close[i + h] - close[i]) / close[i] * 100`.
    pub return_pct: f64,
    /// `(min(close[i..=i + h]) - close[i]) / close[i] * 100`; never positive.
    pub drawdown_pct: f64,
}

/// Computes the outcome for a start close.
///
/// `forward_min` is the lowest close over the forward window including both
/// the start and the horizon endpoint. Returns `None` if either ratio is not
/// finite.
#[must_use]
pub fn forward_outcome(start: f64, end: f64, forward_min: f64) -> Option<ForwardOutcome> {
    let return_pct = (end - start) / start * 100.0;
    // forward_min covers the start close, so this is <= 0 up to rounding.
    let drawdown_pct = ((forward_min - start) / start * 100.0).min(0.0);

    (return_pct.is_finite() && drawdown_pct.is_finite()).then_some(ForwardOutcome {
        return_pct,
        drawdown_pct,
    })
}

/// Lowest close of every forward window `[i, i + horizon]`.
///
/// Element `i` belongs to day `i`; days without a full horizon have no entry,
/// so the result has `len - horizon` elements.
#[must_use]
pub fn forward_minima(closes: &[f64], horizon: usize) -> Vec<f64> {
    SlidingExtrema::new(closes, horizon.saturating_add(1))
        .map(|window| window.min)
        .collect()
}
