//! Decimal rounding for report values.
//!
//! Binary floating point cannot represent `1.005` exactly (it is stored as
//! `1.00499999999999989...`), so rounding the raw `f64` to two places yields
//! `1.00`. Values are first converted to the shortest decimal that round-trips
//! through `f64` and then rounded half away from zero.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, halves away from zero.
///
/// Returns `None` for NaN, infinities, and magnitudes outside the `Decimal`
/// range, so a non-finite value can never leak into a report.
///
/// # Example
///
/// ```rust
/// use pos52_core::rounding::round_half_away;
///
/// assert_eq!(round_half_away(1.005, 2), Some(1.01));
/// assert_eq!(round_half_away(-2.345, 2), Some(-2.35));
/// assert_eq!(round_half_away(f64::NAN, 2), None);
/// ```
#[must_use]
pub fn round_half_away(value: f64, dp: u32) -> Option<f64> {
    let rounded = round_decimal(shortest_decimal(value)?, dp).to_f64()?;
    // -0.001 rounds to -0.00; report it as plain zero.
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

/// The shortest decimal that reads back as `value`, or `None` if not finite.
#[must_use]
pub fn shortest_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // `Display` for f64 prints the shortest digits that round-trip.
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// Rounds a decimal to `dp` places, halves away from zero.
#[must_use]
pub fn round_decimal(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
