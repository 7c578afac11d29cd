//! Per-day derived samples.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The position and forward outcome measured for one trading day.
///
/// `position` is not bounded to `[0, 100]`: the trailing window excludes the
/// day itself, so a close above the trailing high (or below the trailing low)
/// lands outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Index of the day in the price series.
    pub index: usize,
    /// Date of the day.
    pub date: NaiveDate,
    /// Position of the close inside its trailing window, in percent.
    pub position: f64,
    /// Return from the close to the close `horizon` days later, in percent.
    pub forward_return_pct: f64,
    /// Worst decline from the close within the forward window, in percent (<= 0).
    pub forward_drawdown_pct: f64,
}

impl Sample {
    /// Returns true if the forward return is strictly positive.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.forward_return_pct > 0.0
    }
}
