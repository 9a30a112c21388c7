//! Hex field parsing
//!
//! The gateway sends every numeric field as text of the form `0x0001F4`.
//! Strict parsers validate the shape before decoding and report
//! [`HexError`]; [`to_decimal_int`] is the lenient display-only variant.

use crate::error::{HexError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `0x` / `0X` followed by one or more hex digits, nothing else
#[allow(clippy::expect_used)] // Literal pattern, checked by tests
static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[xX]([0-9a-fA-F]+)$").expect("hex pattern compiles"));

/// Validate `s` and return the digits after the prefix
fn hex_digits(s: &str) -> Result<&str> {
    HEX_PATTERN
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| HexError::invalid_format(s))
}

/// Whether `s` is a well-formed hex field
pub fn is_hex(s: &str) -> bool {
    HEX_PATTERN.is_match(s)
}

/// Parse a hex field into a signed 32-bit integer
///
/// Values above `i32::MAX` (e.g. `0x80000000`) are an overflow, not a
/// two's-complement reinterpretation.
pub fn parse_signed_i32(s: &str) -> Result<i32> {
    let digits = hex_digits(s)?;
    // Digits are pre-validated, so the only failure left is range
    i32::from_str_radix(digits, 16).map_err(|e| {
        trace!(input = s, error = %e, "hex value exceeds i32");
        HexError::overflow(s)
    })
}

/// Parse a hex field as an unsigned 32-bit magnitude, widened to `f32`
///
/// The device encodes scaled integers, never IEEE bit patterns, so the
/// result is the integer value itself. Magnitudes above 2^24 lose low bits.
pub fn parse_unsigned_f32(s: &str) -> Result<f32> {
    let digits = hex_digits(s)?;
    let value = u32::from_str_radix(digits, 16).map_err(|e| {
        trace!(input = s, error = %e, "hex value exceeds u32");
        HexError::overflow(s)
    })?;
    Ok(value as f32)
}

/// Lenient integer parsing for display
///
/// Detects the base from the literal prefix: `0x` hex, `0o` octal, `0b`
/// binary, a bare leading `0` octal, anything else decimal. An optional
/// `+`/`-` sign may precede the prefix. The value must fit in `i32`.
///
/// Digit-separating underscores (`0x_1F`, `1_000`) are rejected, unlike Go's
/// `strconv.ParseInt` with base 0, and yield the sentinel.
///
/// Returns `-1` for anything unparseable, which cannot be told apart from a
/// genuine `-1`. Only use the result for printing.
pub fn to_decimal_int(s: &str) -> i32 {
    parse_auto_radix(s).unwrap_or(-1)
}

fn parse_auto_radix(s: &str) -> Option<i32> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };

    // from_str_radix tolerates a sign of its own; the digits must be bare
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
