//! Trailing-window position of each close.
//!
//! For day `i` the window is the `lookback` closes strictly before `i`. With
//! `lo`/`hi` the window extrema, the position is
//! `(close[i] - lo) / (hi - lo) * 100`. Because the day itself is outside its
//! window, the position can fall below 0 or above 100; such values are kept
//! as-is here and dropped later by the bucket aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pos52_core::types::{locate_bucket, BucketSpec, PriceSeries};

use crate::window::{scan_extrema, Extrema, SlidingExtrema};

/// Outcome of measuring one close against its trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Position of the close, in percent of the window range.
    Defined(f64),
    /// The window is flat (`hi == lo`); no position exists.
    Degenerate,
    /// The ratio did not produce a finite number.
    NonFinite,
}

impl Position {
    /// The position value, if defined.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Degenerate | Self::NonFinite => None,
        }
    }
}

/// Measures `close` against a window's extrema.
#[must_use]
pub fn position_of(close: f64, window: Extrema) -> Position {
    if window.is_flat() {
        return Position::Degenerate;
    }
    let position = (close - window.min) / (window.max - window.min) * 100.0;
    if position.is_finite() {
        Position::Defined(position)
    } else {
        Position::NonFinite
    }
}

/// Positions for every day that has a full trailing window.
///
/// Element `k` belongs to day `lookback + k`; the result is empty when the
/// series has `lookback` or fewer closes.
#[must_use]
pub fn trailing_positions(closes: &[f64], lookback: usize) -> Vec<Position> {
    if lookback == 0 || closes.len() <= lookback {
        return Vec::new();
    }
    SlidingExtrema::new(closes, lookback)
        .zip(&closes[lookback..])
        .map(|(window, &close)| position_of(close, window))
        .collect()
}

/// Where the latest close sits inside its trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPosition {
    /// Date of the latest close.
    pub date: NaiveDate,
    /// The latest close.
    pub close: f64,
    /// Lowest close of the trailing window.
    pub window_low: f64,
    /// Highest close of the trailing window.
    pub window_high: f64,
    /// Position in percent; may lie outside `[0, 100]`.
    pub position: f64,
    /// Bucket the position falls in, if any.
    pub bucket: Option<String>,
}

/// Measures the most recent close of `series`.
///
/// Returns `None` if the series is too short for a full window or the window
/// is flat.
#[must_use]
pub fn current_position(
    series: &PriceSeries,
    lookback: usize,
    buckets: &[BucketSpec],
) -> Option<CurrentPosition> {
    let closes = series.closes();
    let last = closes.len().checked_sub(1)?;
    if lookback == 0 || last < lookback {
        return None;
    }

    let window = scan_extrema(&closes[last - lookback..last])?;
    let close = closes[last];
    let position = position_of(close, window).value()?;
    let bucket = locate_bucket(buckets, position).map(|i| buckets[i].name.clone());

    Some(CurrentPosition {
        date: series.date_at(last)?,
        close,
        window_low: window.min,
        window_high: window.max,
        position,
        bucket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), closes).unwrap()
    }

    #[test]
    fn test_position_of() {
        let window = Extrema { min: 10.0, max: 20.0 };
        assert_eq!(position_of(15.0, window), Position::Defined(50.0));
        assert_eq!(position_of(10.0, window), Position::Defined(0.0));
        assert_eq!(position_of(20.0, window), Position::Defined(100.0));
    }

    #[test]
    fn test_position_out_of_range_is_not_clamped() {
        let window = Extrema { min: 10.0, max: 20.0 };
        assert_eq!(position_of(25.0, window), Position::Defined(150.0));
        assert_eq!(position_of(5.0, window), Position::Defined(-50.0));
    }

    #[test]
    fn test_flat_window_is_degenerate() {
        let window = Extrema { min: 7.0, max: 7.0 };
        assert_eq!(position_of(8.0, window), Position::Degenerate);
        assert_eq!(position_of(8.0, window).value(), None);
    }

    #[test]
    fn test_window_excludes_current_close() {
        // Window for day 3 is [1, 2, 3]; the close 2.5 sits at 75%.
        let positions = trailing_positions(&[1.0, 2.0, 3.0, 2.5], 3);
        assert_eq!(positions.len(), 1);
        assert_relative_eq!(positions[0].value().unwrap(), 75.0);
    }

    #[test]
    fn test_trailing_positions_length() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(trailing_positions(&closes, 4).len(), 6);
        assert!(trailing_positions(&closes, 10).is_empty());
        assert!(trailing_positions(&closes, 0).is_empty());
    }

    #[test]
    fn test_rising_series_breaks_above_window() {
        // Each close is above every prior close, so it sits above its window.
        let closes: Vec<f64> = (1..=6).map(f64::from).collect();
        for position in trailing_positions(&closes, 3) {
            assert!(position.value().unwrap() > 100.0);
        }
    }

    #[test]
    fn test_current_position() {
        let s = series(&[10.0, 12.0, 20.0, 14.0, 19.0]);
        let current = current_position(&s, 4, &BucketSpec::standard()).unwrap();

        assert_eq!(current.date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(current.window_low, 10.0);
        assert_eq!(current.window_high, 20.0);
        assert_relative_eq!(current.position, 90.0);
        assert_eq!(current.bucket.as_deref(), Some("p90_100"));
    }

    #[test]
    fn test_current_position_outside_buckets() {
        let s = series(&[10.0, 12.0, 11.0, 30.0]);
        let current = current_position(&s, 3, &BucketSpec::standard()).unwrap();
        assert!(current.position > 100.0);
        assert_eq!(current.bucket, None);
    }

    #[test]
    fn test_current_position_unavailable() {
        let flat = series(&[5.0, 5.0, 5.0, 6.0]);
        assert!(current_position(&flat, 3, &BucketSpec::standard()).is_none());

        let short = series(&[5.0, 6.0]);
        assert!(current_position(&short, 2, &BucketSpec::standard()).is_none());
        assert!(current_position(&PriceSeries::default(), 2, &BucketSpec::standard()).is_none());
    }
}
