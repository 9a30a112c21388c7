//! Record definitions
//!
//! One struct per element the gateway sends. Every field is kept as the raw
//! text found in the XML; interpretation happens in [`crate::render`] and
//! [`crate::readings`] through `eagle-codec`. Missing elements decode as
//! empty strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element names of the records a packet may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    CurrentSummationDelivered,
    CurrentSummation,
    HistoryData,
    DeviceInfo,
    InstantaneousDemand,
    MessageCluster,
    MeterInfo,
    NetworkInfo,
    FastPollStatus,
    PriceCluster,
    BlockPriceDetail,
    ProfileData,
    ScheduleInfo,
    TimeCluster,
}

impl RecordKind {
    /// Kinds that can appear directly under `<rainforest>` or as a bare document
    pub const TOP_LEVEL: [RecordKind; 13] = [
        RecordKind::CurrentSummationDelivered,
        RecordKind::DeviceInfo,
        RecordKind::InstantaneousDemand,
        RecordKind::HistoryData,
        RecordKind::MessageCluster,
        RecordKind::MeterInfo,
        RecordKind::NetworkInfo,
        RecordKind::FastPollStatus,
        RecordKind::PriceCluster,
        RecordKind::BlockPriceDetail,
        RecordKind::ProfileData,
        RecordKind::ScheduleInfo,
        RecordKind::TimeCluster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::CurrentSummationDelivered => "CurrentSummationDelivered",
            RecordKind::CurrentSummation => "CurrentSummation",
            RecordKind::HistoryData => "HistoryData",
            RecordKind::DeviceInfo => "DeviceInfo",
            RecordKind::InstantaneousDemand => "InstantaneousDemand",
            RecordKind::MessageCluster => "MessageCluster",
            RecordKind::MeterInfo => "MeterInfo",
            RecordKind::NetworkInfo => "NetworkInfo",
            RecordKind::FastPollStatus => "FastPollStatus",
            RecordKind::PriceCluster => "PriceCluster",
            RecordKind::BlockPriceDetail => "BlockPriceDetail",
            RecordKind::ProfileData => "ProfileData",
            RecordKind::ScheduleInfo => "ScheduleInfo",
            RecordKind::TimeCluster => "TimeCluster",
        }
    }

    /// Look up a top-level kind by element name
    pub fn from_element(name: &str) -> Option<Self> {
        Self::TOP_LEVEL
            .into_iter()
            .find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meter summation counters (delivered / received energy)
///
/// Also used for the entries of [`HistoryData`], which arrive as
/// `<CurrentSummation>` elements with the same fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Summation {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub time_stamp: String,
    pub summation_delivered: String,
    pub summation_received: String,
    pub multiplier: String,
    pub divisor: String,
    pub digits_right: String,
    pub digits_left: String,
    pub suppress_leading_zero: String,
    pub port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryData {
    #[serde(rename = "CurrentSummation")]
    pub summations: Vec<Summation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeviceInfo {
    pub device_mac_id: String,
    pub install_code: String,
    pub link_key: String,
    #[serde(rename = "FWVersion")]
    pub fw_version: String,
    #[serde(rename = "HWVersion")]
    pub hw_version: String,
    pub image_type: String,
    pub manufacturer: String,
    pub model_id: String,
    pub date_code: String,
    pub port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InstantaneousDemand {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub time_stamp: String,
    pub demand: String,
    pub multiplier: String,
    pub divisor: String,
    pub digits_right: String,
    pub digits_left: String,
    pub suppress_leading_zero: String,
    pub port: String,
}

/// Text message pushed by the utility
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MessageCluster {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub time_stamp: String,
    pub id: String,
    pub text: String,
    pub priority: String,
    pub start_time: String,
    pub duration: String,
    pub confirmation_required: String,
    pub confirmed: String,
    pub queue: String,
    pub port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MeterInfo {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    #[serde(rename = "Type")]
    pub meter_type: String,
    pub nick_name: String,
    pub account: String,
    pub auth: String,
    pub host: String,
    pub enabled: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NetworkInfo {
    pub device_mac_id: String,
    pub coord_mac_id: String,
    pub status: String,
    pub description: String,
    pub ext_pan_id: String,
    pub channel: String,
    pub short_addr: String,
    pub link_strength: String,
    pub port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FastPollStatus {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub frequency: String,
    pub end_time: String,
    pub port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PriceCluster {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub time_stamp: String,
    pub price: String,
    pub currency: String,
    pub trailing_digits: String,
    pub tier: String,
    pub start_time: String,
    pub duration: String,
    pub rate_label: String,
    pub port: String,
}

/// Block (tiered) pricing detail, not in the uploader API manual
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlockPriceDetail {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub time_stamp: String,
    pub current_start: String,
    pub current_duration: String,
    pub block_period_consumption: String,
    pub block_period_consumption_multiplier: String,
    pub block_period_consumption_divisor: String,
    pub number_of_blocks: String,
    pub multiplier: String,
    pub divisor: String,
    pub currency: String,
    pub trailing_digits: String,
    pub port: String,
}

/// Interval profile with up to twelve data slots
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProfileData {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub end_time: String,
    pub status: String,
    pub profile_interval_period: String,
    pub number_of_periods_delivered: String,
    pub interval_data1: String,
    pub interval_data2: String,
    pub interval_data3: String,
    pub interval_data4: String,
    pub interval_data5: String,
    pub interval_data6: String,
    pub interval_data7: String,
    pub interval_data8: String,
    pub interval_data9: String,
    pub interval_data10: String,
    pub interval_data11: String,
    pub interval_data12: String,
    pub port: String,
}

impl ProfileData {
    /// Interval slots in order, 1 through 12
    pub fn intervals(&self) -> [&str; 12] {
        [
            &self.interval_data1,
            &self.interval_data2,
            &self.interval_data3,
            &self.interval_data4,
            &self.interval_data5,
            &self.interval_data6,
            &self.interval_data7,
            &self.interval_data8,
            &self.interval_data9,
            &self.interval_data10,
            &self.interval_data11,
            &self.interval_data12,
        ]
    }
}

/// Not in uploader API manual
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ScheduleInfo {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    pub event: String,
    pub frequency: String,
    pub enabled: String,
}

/// Not in uploader API manual
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TimeCluster {
    pub device_mac_id: String,
    pub meter_mac_id: String,
    #[serde(rename = "UTCTime")]
    pub utc_time: String,
    pub local_time: String,
    pub port: String,
}
