//! Device epoch time conversion
//!
//! The meter clock counts seconds from 2000-01-01T00:00:00Z (device epoch)
//! while everything else counts from 1970-01-01T00:00:00Z (standard epoch).
//! [`EpochOffset`] is the distance between the two, derived once from the
//! calendar and handed to every [`EpochConverter`].

use crate::error::{HexError, Result};
use crate::hex::parse_signed_i32;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

/// Seconds between the standard epoch and the device epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpochOffset(i64);

impl EpochOffset {
    /// Derive the offset by civil calendar subtraction (no leap seconds)
    #[allow(clippy::expect_used)] // Both dates are fixed, valid calendar constants
    pub fn compute() -> Self {
        let standard = Utc
            .with_ymd_and_hms(1970, 1, 1, 0, 0, 0)
            .single()
            .expect("standard epoch is a valid date");
        let device = Utc
            .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
            .single()
            .expect("device epoch is a valid date");
        Self(device.signed_duration_since(standard).num_seconds())
    }

    pub fn seconds(self) -> i64 {
        self.0
    }
}

impl Default for EpochOffset {
    fn default() -> Self {
        Self::compute()
    }
}

/// Converts between device-epoch and standard-epoch instants
///
/// Cheap to copy; build one at startup and pass it to whatever renders
/// or encodes timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EpochConverter {
    offset: EpochOffset,
}

impl EpochConverter {
    /// Create a converter with a freshly computed offset
    pub fn new() -> Self {
        Self::with_offset(EpochOffset::compute())
    }

    /// Create a converter sharing an already computed offset
    pub fn with_offset(offset: EpochOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> EpochOffset {
        self.offset
    }

    /// Instant reported alongside a failed conversion: the standard epoch itself
    ///
    /// Callers must look at the error, this is not a sentinel.
    pub fn failed_time() -> DateTime<Utc> {
        DateTime::<Utc>::default()
    }

    /// Convert a hex device timestamp to a standard-epoch instant
    pub fn to_standard_epoch_time(&self, hex: &str) -> Result<DateTime<Utc>> {
        let raw = parse_signed_i32(hex).inspect_err(|e| {
            debug!(input = hex, error = %e, "timestamp conversion failed");
        })?;
        let secs = i64::from(raw) + self.offset.seconds();
        DateTime::from_timestamp(secs, 0).ok_or_else(|| HexError::overflow(hex))
    }

    /// Express a standard-epoch instant relative to the device epoch
    ///
    /// Sub-second precision is dropped. Instants too close to the start of
    /// the representable range clamp to it.
    pub fn to_device_epoch_time(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let secs = t.timestamp().saturating_sub(self.offset.seconds());
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Encode an instant the way the device does: `0x` + 8 hex digits of
    /// device-epoch seconds
    ///
    /// Instants before the device epoch, or more than `i32::MAX` seconds
    /// after it, have no device encoding.
    pub fn encode_device_time(&self, t: DateTime<Utc>) -> Result<String> {
        let secs = self.to_device_epoch_time(t).timestamp();
        if !(0..=i64::from(i32::MAX)).contains(&secs) {
            return Err(HexError::overflow(t.to_rfc3339()));
        }
        Ok(format!("0x{:08X}", secs))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_offset_is_thirty_calendar_years() {
        // 30 years with 7 leap days (72, 76, 80, 84, 88, 92, 96)
        assert_eq!(EpochOffset::compute().seconds(), (30 * 365 + 7) * 86_400);
        assert_eq!(EpochOffset::compute().seconds(), 946_684_800);
    }

    #[test]
    fn test_to_standard_epoch_time() {
        let converter = EpochConverter::new();
        assert_eq!(
            converter.to_standard_epoch_time("0x1C96BB5D").unwrap(),
            utc(2015, 3, 14, 9, 26, 53)
        );
        assert_eq!(
            converter.to_standard_epoch_time("0x00000000").unwrap(),
            utc(2000, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_to_standard_epoch_time_errors() {
        let converter = EpochConverter::new();
        assert_eq!(
            converter.to_standard_epoch_time("1C96BB5D"),
            Err(HexError::invalid_format("1C96BB5D"))
        );
        assert_eq!(
            converter.to_standard_epoch_time("0x80000000"),
            Err(HexError::overflow("0x80000000"))
        );
        assert_eq!(EpochConverter::failed_time().timestamp(), 0);
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_failed_conversion_is_logged() {
        let result = EpochConverter::new().to_standard_epoch_time("nope");
        assert!(result.is_err());
        assert!(logs_contain("timestamp conversion failed"));
    }

    #[test]
    fn test_to_device_epoch_time() {
        let converter = EpochConverter::new();
        assert_eq!(
            converter.to_device_epoch_time(utc(2015, 3, 14, 9, 26, 53)),
            utc(1985, 3, 14, 9, 26, 53)
        );
        assert_eq!(
            converter.to_device_epoch_time(utc(2000, 1, 1, 0, 0, 0)).timestamp(),
            0
        );
    }

    #[test]
    fn test_to_device_epoch_time_drops_subseconds() {
        let converter = EpochConverter::new();
        let t = utc(2015, 3, 14, 9, 26, 53) + chrono::Duration::milliseconds(750);
        assert_eq!(
            converter.to_device_epoch_time(t),
            utc(1985, 3, 14, 9, 26, 53)
        );
    }

    #[test]
    fn test_encode_device_time() {
        let converter = EpochConverter::new();
        assert_eq!(
            converter
                .encode_device_time(utc(2015, 3, 14, 9, 26, 53))
                .unwrap(),
            "0x1C96BB5D"
        );
        assert_eq!(
            converter.encode_device_time(utc(2000, 1, 1, 0, 0, 0)).unwrap(),
            "0x00000000"
        );
        assert!(matches!(
            converter.encode_device_time(utc(1999, 12, 31, 23, 59, 59)),
            Err(HexError::Overflow(_))
        ));
    }

    #[test]
    fn test_injected_offset_is_used() {
        let converter = EpochConverter::with_offset(EpochOffset(0));
        assert_eq!(
            converter.to_standard_epoch_time("0x0000003C").unwrap(),
            utc(1970, 1, 1, 0, 1, 0)
        );
    }
}
