//! Display helpers for the text reports
//!
//! Everything here turns a conversion into text and never fails: errors are
//! rendered as their message in place of the value.

use crate::epoch::EpochConverter;
use crate::error::Result;
use crate::hex::to_decimal_int;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Fallback precision when `DigitsRight` is unusable (matches `{:.6}` of C printf `%f`)
const DEFAULT_PRECISION: usize = 6;

/// Upper bound on digit counts taken from the wire
const MAX_DIGITS: usize = 15;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

/// Zone used when printing converted timestamps
///
/// Defaults to UTC rather than the host zone; `Local` prints in the host's
/// zone instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

/// Render an instant as `2015-03-14 09:26:53 +0000 UTC`
pub fn format_time(t: DateTime<Utc>, zone: TimeZoneMode) -> String {
    match zone {
        TimeZoneMode::Utc => t.format(TIME_FORMAT).to_string(),
        TimeZoneMode::Local => t.with_timezone(&Local).format(TIME_FORMAT).to_string(),
    }
}

impl EpochConverter {
    /// Converted timestamp, or the conversion error's message
    pub fn display_time(&self, hex: &str, zone: TimeZoneMode) -> String {
        match self.to_standard_epoch_time(hex) {
            Ok(t) => format_time(t, zone),
            Err(e) => e.to_string(),
        }
    }
}

/// Field width and decimals for a scaled reading
///
/// Built from a record's `DigitsLeft` / `DigitsRight` fields. Both are read
/// with the lenient parser, so a `-1` here means "unparseable" and is never
/// fed into the width arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrecision {
    pub width: Option<usize>,
    pub precision: usize,
}

impl DisplayPrecision {
    pub fn from_digits(digits_left: &str, digits_right: &str) -> Self {
        let left = digit_count(digits_left);
        let right = digit_count(digits_right);
        Self {
            width: left.zip(right).map(|(l, r)| l + r),
            precision: right.unwrap_or(DEFAULT_PRECISION),
        }
    }

    /// Fixed decimals with a minimum width, as block price values use
    pub fn fixed(width: usize, digits: &str) -> Self {
        Self {
            width: Some(width),
            precision: digit_count(digits).unwrap_or(DEFAULT_PRECISION),
        }
    }

    pub fn format(&self, value: f32) -> String {
        let precision = self.precision;
        match self.width {
            Some(width) => format!("{value:>width$.precision$}"),
            None => format!("{value:.precision$}"),
        }
    }
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self {
            width: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

fn digit_count(field: &str) -> Option<usize> {
    usize::try_from(to_decimal_int(field))
        .ok()
        .map(|n| n.min(MAX_DIGITS))
}

/// A scaled reading at the given precision, or its error message
pub fn format_scaled(result: &Result<f32>, precision: DisplayPrecision) -> String {
    match result {
        Ok(value) => precision.format(*value),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::error::HexError;
    use chrono::TimeZone;

    #[test]
    fn test_format_time_utc() {
        let t = Utc.with_ymd_and_hms(2015, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(
            format_time(t, TimeZoneMode::Utc),
            "2015-03-14 09:26:53 +0000 UTC"
        );
    }

    #[test]
    fn test_zone_defaults_to_utc() {
        assert_eq!(TimeZoneMode::default(), TimeZoneMode::Utc);
    }

    #[test]
    fn test_display_time() {
        let converter = EpochConverter::new();
        assert_eq!(
            converter.display_time("0x1C96BB5D", TimeZoneMode::Utc),
            "2015-03-14 09:26:53 +0000 UTC"
        );
        assert_eq!(
            converter.display_time("garbage", TimeZoneMode::Utc),
            "Invalid hex value garbage"
        );
    }

    #[test]
    fn test_precision_from_digits() {
        let p = DisplayPrecision::from_digits("0x06", "0x03");
        assert_eq!(p.width, Some(9));
        assert_eq!(p.precision, 3);
        assert_eq!(p.format(1.069), "    1.069");
    }

    #[test]
    fn test_precision_with_unparseable_digits() {
        let p = DisplayPrecision::from_digits("", "0x02");
        assert_eq!(p.width, None);
        assert_eq!(p.precision, 2);

        let p = DisplayPrecision::from_digits("0x05", "nope");
        assert_eq!(p, DisplayPrecision::default());
        assert_eq!(p.format(1.5), "1.500000");
    }

    #[test]
    fn test_precision_is_capped() {
        let p = DisplayPrecision::from_digits("0x7FFFFFFF", "0x7FFFFFFF");
        assert_eq!(p.precision, MAX_DIGITS);
        assert_eq!(p.width, Some(2 * MAX_DIGITS));
    }

    #[test]
    fn test_format_scaled() {
        let p = DisplayPrecision::fixed(6, "0x02");
        assert_eq!(format_scaled(&Ok(0.14), p), "  0.14");
        assert_eq!(
            format_scaled(&Err(HexError::invalid_format("x")), p),
            "Invalid hex value x"
        );
        assert_eq!(format_scaled(&Ok(f32::INFINITY), p), "   inf");
    }
}
