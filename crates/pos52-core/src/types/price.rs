//! Daily price records and the validated price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single trading day's close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Returns true if the close is a positive finite number.
    #[must_use]
    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// An ascending, duplicate-free sequence of daily closes.
///
/// The series is immutable once built. Gaps between dates are allowed: all
/// windowing works on sequence position, not calendar distance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Builds a series, rejecting invalid closes and unordered or repeated dates.
    pub fn new(points: Vec<PricePoint>) -> CoreResult<Self> {
        for point in &points {
            if !point.has_valid_close() {
                return Err(CoreError::InvalidClose {
                    date: point.date,
                    value: point.close,
                });
            }
        }

        for pair in points.windows(2) {
            let (previous, next) = (pair[0].date, pair[1].date);
            if next == previous {
                return Err(CoreError::DuplicateDate { date: next });
            }
            if next < previous {
                return Err(CoreError::UnorderedSeries { previous, next });
            }
        }

        let closes = points.iter().map(|p| p.close).collect();
        Ok(Self { points, closes })
    }

    /// Builds a series from bare closes on consecutive calendar days.
    ///
    /// Dates are synthetic; this is meant for closes that carry no date label.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> CoreResult<Self> {
        let points = start
            .iter_days()
            .zip(closes.iter().copied())
            .map(|(date, close)| PricePoint::new(date, close))
            .collect();
        Self::new(points)
    }

    /// Number of trading days in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in ascending date order.
    #[must_use]
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Date of the point at `index`.
    #[must_use]
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.points.get(index).map(|p| p.date)
    }

    /// Date of the most recent point.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Fails with `InsufficientHistory` unless the series has `required` points.
    pub fn ensure_len(&self, required: usize) -> CoreResult<()> {
        if self.len() < required {
            return Err(CoreError::insufficient_history(required, self.len()));
        }
        Ok(())
    }
}
