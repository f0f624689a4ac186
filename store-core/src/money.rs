//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary math is done with `Decimal` internally and converted back
//! to `f64` for storage/serialization, rounded to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite inputs (NaN, infinity) coerce to zero rather than raising;
/// the pricing engine must not fail on bad numeric input.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round a Decimal to money precision (2 decimal places, half-up)
///
/// Every monetary rounding in the engine goes through here so that line
/// totals and aggregate sums agree at midpoints.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Line total for a cart or order line
///
/// `quantity × unit_price`, rounded to 2 decimal places. Quantity may be
/// fractional for weight units.
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    to_f64(to_decimal(quantity) * to_decimal(unit_price))
}
