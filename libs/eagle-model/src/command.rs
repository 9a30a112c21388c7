//! Local API command requests
//!
//! Requests sent to the gateway's local interface, e.g.
//!
//! ```xml
//! <LocalCommand><Name>get_history_data</Name><MacId>0xd8d5b90000001234</MacId>
//! <StartTime>0x1C96BB5D</StartTime></LocalCommand>
//! ```
//!
//! Times go out in the device's own hex encoding.

use crate::error::{ModelError, Result};
use chrono::{DateTime, Utc};
use eagle_codec::EpochConverter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "LocalCommand", rename_all = "PascalCase")]
pub struct LocalCommand {
    pub name: String,
    pub mac_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

impl LocalCommand {
    pub fn new(name: impl Into<String>, mac_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac_id: mac_id.into(),
            start_time: None,
            end_time: None,
            frequency: None,
        }
    }

    pub fn with_start_time(mut self, converter: &EpochConverter, t: DateTime<Utc>) -> Result<Self> {
        self.start_time = Some(converter.encode_device_time(t)?);
        Ok(self)
    }

    pub fn with_end_time(mut self, converter: &EpochConverter, t: DateTime<Utc>) -> Result<Self> {
        self.end_time = Some(converter.encode_device_time(t)?);
        Ok(self)
    }

    /// Polling period in seconds, sent as `0x%04X`
    pub fn with_frequency(mut self, seconds: u16) -> Self {
        self.frequency = Some(format!("0x{:04X}", seconds));
        self
    }

    pub fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(self).map_err(|e| ModelError::xml(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use chrono::TimeZone;
    use eagle_codec::HexError;

    #[test]
    fn test_minimal_command() {
        let xml = LocalCommand::new("get_device_data", "0xd8d5b90000001234")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<LocalCommand><Name>get_device_data</Name><MacId>0xd8d5b90000001234</MacId></LocalCommand>"
        );
    }

    #[test]
    fn test_history_command_times() {
        let converter = EpochConverter::new();
        let start = Utc.with_ymd_and_hms(2015, 3, 14, 9, 26, 53).unwrap();
        let cmd = LocalCommand::new("get_history_data", "0x01")
            .with_start_time(&converter, start)
            .unwrap();

        assert_eq!(cmd.start_time.as_deref(), Some("0x1C96BB5D"));
        assert!(cmd.to_xml().unwrap().contains("<StartTime>0x1C96BB5D</StartTime>"));
    }

    #[test]
    fn test_fast_poll_frequency() {
        let cmd = LocalCommand::new("set_fast_poll", "0x01").with_frequency(4);
        assert_eq!(cmd.frequency.as_deref(), Some("0x0004"));
    }

    #[test]
    fn test_time_before_device_epoch_is_rejected() {
        let converter = EpochConverter::new();
        let t = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        let err = LocalCommand::new("get_history_data", "0x01")
            .with_start_time(&converter, t)
            .unwrap_err();
        assert!(matches!(err, ModelError::Conversion(HexError::Overflow(_))));
    }
}
