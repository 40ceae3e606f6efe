//! Money calculation utilities using rust_decimal for precision
//!
//! All derived monetary values are computed with `Decimal` internally,
//! then converted to `f64` for storage/serialization. Rounding is 2
//! decimal places, half-up.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// GST applied to every cart (5%)
pub const TAX_RATE: f64 = 0.05;

/// Convert an f64 amount to Decimal; non-finite values collapse to zero
pub fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Round a Decimal to 2 places and convert back to f64
pub fn to_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 amount to 2 decimal places, half-up
pub fn round2(value: f64) -> f64 {
    to_money(dec(value))
}

/// price × quantity, rounded to 2 places
pub fn line_total(price: f64, quantity: i32) -> f64 {
    to_money(dec(price) * Decimal::from(quantity))
}

/// Tax on a subtotal at the fixed 5% rate
pub fn tax_on(subtotal: f64) -> f64 {
    to_money(dec(subtotal) * dec(TAX_RATE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn line_total_is_exact() {
        assert_eq!(line_total(100.0, 2), 200.0);
        assert_eq!(line_total(0.1, 3), 0.3); // no binary float drift
    }

    #[test]
    fn five_percent_tax() {
        assert_eq!(tax_on(250.0), 12.5);
        assert_eq!(tax_on(0.0), 0.0);
    }

    #[test]
    fn non_finite_input_degrades_to_zero() {
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
    }
}
