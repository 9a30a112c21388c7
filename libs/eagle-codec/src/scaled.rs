//! Scaled readings
//!
//! Demand, summation and block values arrive as three hex fields: a raw
//! magnitude plus the multiplier and divisor that turn it into physical
//! units. Prices carry a `TrailingDigits` count instead of a divisor.

use crate::error::{HexError, Result};
use crate::hex::{parse_signed_i32, parse_unsigned_f32};

/// Largest trailing digit count whose power of ten still fits a `u32` divisor
const MAX_TRAILING_DIGITS: i32 = 9;

/// `raw * multiplier / divisor` in single precision
///
/// Operands are parsed in order and the first bad one is returned; later
/// ones are not looked at.
///
/// A zero divisor is not an error: the result is `inf` (or `NaN` when the
/// numerator is also zero), exactly as `f32` division yields. The device
/// never sends a zero divisor in practice.
///
/// No rounding is applied; display precision comes from the record's
/// digit-count fields.
pub fn compute_scaled_value(raw_hex: &str, multiplier_hex: &str, divisor_hex: &str) -> Result<f32> {
    let raw = parse_unsigned_f32(raw_hex)?;
    let multiplier = parse_unsigned_f32(multiplier_hex)?;
    let divisor = parse_unsigned_f32(divisor_hex)?;
    Ok(raw * multiplier / divisor)
}

/// Price in currency units: `price / 10^trailing_digits`
pub fn price_value(price_hex: &str, trailing_digits_hex: &str) -> Result<f32> {
    let price = parse_unsigned_f32(price_hex)?;
    let digits = parse_signed_i32(trailing_digits_hex)?;
    if !(0..=MAX_TRAILING_DIGITS).contains(&digits) {
        return Err(HexError::overflow(trailing_digits_hex));
    }
    Ok(price / 10u32.pow(digits as u32) as f32)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_demand_reading() {
        let value = compute_scaled_value("0x00042d", "0x00000001", "0x000003e8").unwrap();
        assert!((value - 1.069).abs() < f32::EPSILON);
    }

    #[test]
    fn test_multiplier_applies_before_divisor() {
        let value = compute_scaled_value("0x0000000a", "0x00000003", "0x00000004").unwrap();
        assert_eq!(value, 7.5);
    }

    #[test]
    fn test_zero_divisor_is_not_an_error() {
        let inf = compute_scaled_value("0x00000010", "0x00000001", "0x00000000").unwrap();
        assert!(inf.is_infinite() && inf.is_sign_positive());

        let nan = compute_scaled_value("0x00000000", "0x00000001", "0x00000000").unwrap();
        assert!(nan.is_nan());
    }

    #[test]
    fn test_first_error_wins() {
        assert_eq!(
            compute_scaled_value("bad", "0x1", "also-bad"),
            Err(HexError::invalid_format("bad"))
        );
        assert_eq!(
            compute_scaled_value("0x1", "0x100000000", "also-bad"),
            Err(HexError::overflow("0x100000000"))
        );
        assert_eq!(
            compute_scaled_value("0x1", "0x1", "0x"),
            Err(HexError::invalid_format("0x"))
        );
    }

    #[test]
    fn test_price_value() {
        assert_eq!(price_value("0x0000000e", "0x02").unwrap(), 0.14);
        assert_eq!(price_value("0x00000005", "0x00").unwrap(), 5.0);
        assert_eq!(price_value("0x5", "0x0A"), Err(HexError::overflow("0x0A")));
        assert_eq!(price_value("5", "0x02"), Err(HexError::invalid_format("5")));
    }
}
