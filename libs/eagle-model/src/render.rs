//! Fixed-width text reports
//!
//! Each record renders as a block:
//!
//! ```text
//!
//! InstantaneousDemand       DeviceMacId          0xd8d5b90000001234
//!                           MeterMacId           0x00135003007c1234
//!                           TimeStamp            2015-03-14 09:26:53 +0000 UTC
//!                           Demand               1069     1.069
//! ```
//!
//! Conversion failures never abort a report; the error text is printed in
//! place of the value.

use crate::packet::Packet;
use crate::records::{
    BlockPriceDetail, DeviceInfo, FastPollStatus, HistoryData, InstantaneousDemand,
    MessageCluster, MeterInfo, NetworkInfo, PriceCluster, ProfileData, ScheduleInfo, Summation,
    TimeCluster,
};
use eagle_codec::{
    compute_scaled_value, format_scaled, price_value, to_decimal_int, DisplayPrecision,
    EpochConverter, TimeZoneMode,
};
use std::fmt::Write;

/// Column where labels start
const NAME_WIDTH: usize = 26;

/// Minimum label column width (longest common label plus a space)
const MIN_LABEL_WIDTH: usize = 21;

/// Minimum width of block price values
const BLOCK_VALUE_WIDTH: usize = 6;

/// Text shown for a packet without any record
pub const EMPTY_REPORT: &str = "Unknown xml";

/// Header line opening a `HistoryData` record, printed even with no entries
pub const HISTORY_BANNER: &str =
    "+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++HistoryData";

/// Label/value lines of one record
struct RecordBlock {
    name: &'static str,
    lines: Vec<(&'static str, String)>,
}

impl RecordBlock {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            lines: Vec::new(),
        }
    }

    fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.lines.push((label, value.into()));
        self
    }

    fn write_to(&self, out: &mut String) {
        out.push('\n');
        if self.lines.is_empty() {
            out.push_str(self.name);
            out.push('\n');
            return;
        }

        let label_width = self
            .lines
            .iter()
            .map(|(label, _)| label.len() + 1)
            .max()
            .unwrap_or(0)
            .max(MIN_LABEL_WIDTH);

        for (i, (label, value)) in self.lines.iter().enumerate() {
            let lead = if i == 0 { self.name } else { "" };
            // Writing to String is infallible
            let _ = writeln!(
                out,
                "{:<name_w$}{:<label_w$}{}",
                format!("{lead:<w$} ", w = NAME_WIDTH - 1),
                label,
                value,
                name_w = NAME_WIDTH,
                label_w = label_width,
            );
        }
    }
}

/// Renders packets into the text report format
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    converter: EpochConverter,
    zone: TimeZoneMode,
}

impl ReportRenderer {
    pub fn new(converter: EpochConverter, zone: TimeZoneMode) -> Self {
        Self { converter, zone }
    }

    /// Render every record in the packet, or [`EMPTY_REPORT`] if there are none
    pub fn render(&self, packet: &Packet) -> String {
        let mut blocks = Vec::new();

        // History, meter and schedule info lead the report
        if let Some(history) = &packet.history {
            blocks.extend(self.history(history));
        }
        if let Some(meter) = &packet.meter {
            blocks.push(self.meter_info(meter));
        }
        if let Some(schedule) = &packet.schedule {
            blocks.push(self.schedule_info(schedule));
        }
        if let Some(current) = &packet.current {
            blocks.push(self.summation("CurrentSummationDelivered", current));
        }
        if let Some(device) = &packet.device {
            blocks.push(self.device_info(device));
        }
        if let Some(demand) = &packet.demand {
            blocks.push(self.demand(demand));
        }
        if let Some(message) = &packet.message {
            blocks.push(self.message(message));
        }
        if let Some(network) = &packet.network {
            blocks.push(self.network_info(network));
        }
        if let Some(poll) = &packet.poll {
            blocks.push(self.fast_poll(poll));
        }
        if let Some(price) = &packet.price {
            blocks.push(self.price(price));
        }
        if let Some(detail) = &packet.price_detail {
            blocks.push(self.block_price(detail));
        }
        if let Some(profile) = &packet.profile {
            blocks.push(self.profile(profile));
        }
        if let Some(time) = &packet.time {
            blocks.push(self.time_cluster(time));
        }

        if blocks.is_empty() {
            return EMPTY_REPORT.to_string();
        }

        let mut out = String::new();
        for block in &blocks {
            block.write_to(&mut out);
        }
        out
    }

    fn time(&self, hex: &str) -> String {
        self.converter.display_time(hex, self.zone)
    }

    fn history(&self, history: &HistoryData) -> Vec<RecordBlock> {
        std::iter::once(RecordBlock::new(HISTORY_BANNER))
            .chain(
                history
                    .summations
                    .iter()
                    .map(|entry| self.summation("CurrentSummation", entry)),
            )
            .collect()
    }

    fn summation(&self, name: &'static str, s: &Summation) -> RecordBlock {
        let precision = DisplayPrecision::from_digits(&s.digits_left, &s.digits_right);
        let delivered = compute_scaled_value(&s.summation_delivered, &s.multiplier, &s.divisor);
        let received = compute_scaled_value(&s.summation_received, &s.multiplier, &s.divisor);

        RecordBlock::new(name)
            .field("DeviceMacId", &s.device_mac_id)
            .field("MeterMacId", &s.meter_mac_id)
            .field("TimeStamp", self.time(&s.time_stamp))
            .field(
                "SummationDelivered",
                raw_and_scaled(&s.summation_delivered, &delivered, precision),
            )
            .field(
                "SummationReceived",
                raw_and_scaled(&s.summation_received, &received, precision),
            )
            .field("Multiplier", count(&s.multiplier))
            .field("Divisor", count(&s.divisor))
            .field("DigitsRight", count(&s.digits_right))
            .field("DigitsLeft", count(&s.digits_left))
            .field("SuppressLeadingZero", &s.suppress_leading_zero)
            .field("Port", &s.port)
    }

    fn device_info(&self, d: &DeviceInfo) -> RecordBlock {
        RecordBlock::new("DeviceInfo")
            .field("DeviceMacId", &d.device_mac_id)
            .field("InstallCode", &d.install_code)
            .field("LinkKey", &d.link_key)
            .field("FWVersion", &d.fw_version)
            .field("HWVersion", &d.hw_version)
            .field("ImageType", &d.image_type)
            .field("Manufacturer", &d.manufacturer)
            .field("ModelId", &d.model_id)
            .field("DateCode", &d.date_code)
            .field("Port", &d.port)
    }

    fn demand(&self, d: &InstantaneousDemand) -> RecordBlock {
        let precision = DisplayPrecision::from_digits(&d.digits_left, &d.digits_right);
        let value = compute_scaled_value(&d.demand, &d.multiplier, &d.divisor);

        RecordBlock::new("InstantaneousDemand")
            .field("DeviceMacId", &d.device_mac_id)
            .field("MeterMacId", &d.meter_mac_id)
            .field("TimeStamp", self.time(&d.time_stamp))
            .field("Demand", raw_and_scaled(&d.demand, &value, precision))
            .field("Multiplier", count(&d.multiplier))
            .field("Divisor", count(&d.divisor))
            .field("DigitsRight", count(&d.digits_right))
            .field("DigitsLeft", count(&d.digits_left))
            .field("SuppressLeadingZero", &d.suppress_leading_zero)
            .field("Port", &d.port)
    }

    fn message(&self, m: &MessageCluster) -> RecordBlock {
        RecordBlock::new("MessageCluster")
            .field("DeviceMacId", &m.device_mac_id)
            .field("MeterMacId", &m.meter_mac_id)
            .field("TimeStamp", self.time(&m.time_stamp))
            .field("Id", &m.id)
            .field("Text", &m.text)
            .field("Priority", &m.priority)
            .field("StartTime", self.time(&m.start_time))
            .field("Duration", count(&m.duration))
            .field("ConfirmationRequired", &m.confirmation_required)
            .field("Confirmed", &m.confirmed)
            .field("Queue", &m.queue)
            .field("Port", &m.port)
    }

    fn meter_info(&self, m: &MeterInfo) -> RecordBlock {
        RecordBlock::new("MeterInfo")
            .field("DeviceMacId", &m.device_mac_id)
            .field("MeterMacId", &m.meter_mac_id)
            .field("Type", &m.meter_type)
            .field("NickName", &m.nick_name)
            .field("Account", &m.account)
            .field("Auth", &m.auth)
            .field("Host", &m.host)
            .field("Enabled", &m.enabled)
    }

    fn network_info(&self, n: &NetworkInfo) -> RecordBlock {
        RecordBlock::new("NetworkInfo")
            .field("DeviceMacId", &n.device_mac_id)
            .field("CoordMacId", &n.coord_mac_id)
            .field("Status", &n.status)
            .field("Description", &n.description)
            .field("ExtPanId", &n.ext_pan_id)
            .field("Channel", count(&n.channel))
            .field("ShortAddr", &n.short_addr)
            .field("LinkStrength", count(&n.link_strength))
            .field("Port", &n.port)
    }

    fn fast_poll(&self, f: &FastPollStatus) -> RecordBlock {
        RecordBlock::new("FastPollStatus")
            .field("DeviceMacId", &f.device_mac_id)
            .field("MeterMacId", &f.meter_mac_id)
            .field("Frequency", count(&f.frequency))
            .field("EndTime", self.time(&f.end_time))
            .field("Port", &f.port)
    }

    fn price(&self, p: &PriceCluster) -> RecordBlock {
        let precision = DisplayPrecision::fixed(0, &p.trailing_digits);
        let value = price_value(&p.price, &p.trailing_digits);

        RecordBlock::new("PriceCluster")
            .field("DeviceMacId", &p.device_mac_id)
            .field("MeterMacId", &p.meter_mac_id)
            .field("TimeStamp", self.time(&p.time_stamp))
            .field("Price", raw_and_scaled(&p.price, &value, precision))
            .field("Currency", count(&p.currency))
            .field("TrailingDigits", count(&p.trailing_digits))
            .field("Tier", count(&p.tier))
            .field("StartTime", self.time(&p.start_time))
            .field("Duration", count(&p.duration))
            .field("RateLabel", &p.rate_label)
            .field("Port", &p.port)
    }

    fn block_price(&self, b: &BlockPriceDetail) -> RecordBlock {
        let precision = DisplayPrecision::fixed(BLOCK_VALUE_WIDTH, &b.trailing_digits);
        let consumption = compute_scaled_value(
            &b.block_period_consumption,
            &b.block_period_consumption_multiplier,
            &b.block_period_consumption_divisor,
        );
        let blocks = compute_scaled_value(&b.number_of_blocks, &b.multiplier, &b.divisor);

        RecordBlock::new("BlockPriceDetail")
            .field("DeviceMacId", &b.device_mac_id)
            .field("MeterMacId", &b.meter_mac_id)
            .field("TimeStamp", self.time(&b.time_stamp))
            .field("CurrentStart", self.time(&b.current_start))
            .field("CurrentDuration", count(&b.current_duration))
            .field(
                "BlockPeriodConsumption",
                raw_and_scaled(&b.block_period_consumption, &consumption, precision),
            )
            .field(
                "BlockPeriodConsumptionMultiplier",
                count(&b.block_period_consumption_multiplier),
            )
            .field(
                "BlockPeriodConsumptionDivisor",
                count(&b.block_period_consumption_divisor),
            )
            .field(
                "NumberOfBlocks",
                raw_and_scaled(&b.number_of_blocks, &blocks, precision),
            )
            .field("Multiplier", count(&b.multiplier))
            .field("Divisor", count(&b.divisor))
            .field("Currency", count(&b.currency))
            .field("TrailingDigits", count(&b.trailing_digits))
            .field("Port", &b.port)
    }

    fn profile(&self, p: &ProfileData) -> RecordBlock {
        const SLOT_LABELS: [&str; 12] = [
            "IntervalData1",
            "IntervalData2",
            "IntervalData3",
            "IntervalData4",
            "IntervalData5",
            "IntervalData6",
            "IntervalData7",
            "IntervalData8",
            "IntervalData9",
            "IntervalData10",
            "IntervalData11",
            "IntervalData12",
        ];

        let block = RecordBlock::new("ProfileData")
            .field("DeviceMacId", &p.device_mac_id)
            .field("MeterMacId", &p.meter_mac_id)
            .field("EndTime", self.time(&p.end_time))
            .field("Status", count(&p.status))
            .field("ProfileIntervalPeriod", &p.profile_interval_period)
            .field(
                "NumberOfPeriodsDelivered",
                count(&p.number_of_periods_delivered),
            );

        SLOT_LABELS
            .into_iter()
            .zip(p.intervals())
            .fold(block, |block, (label, slot)| block.field(label, count(slot)))
            .field("Port", &p.port)
    }

    fn schedule_info(&self, s: &ScheduleInfo) -> RecordBlock {
        RecordBlock::new("ScheduleInfo")
            .field("DeviceMacId", &s.device_mac_id)
            .field("MeterMacId", &s.meter_mac_id)
            .field("Event", &s.event)
            .field("Frequency", count(&s.frequency))
            .field("Enabled", &s.enabled)
    }

    fn time_cluster(&self, t: &TimeCluster) -> RecordBlock {
        RecordBlock::new("TimeCluster")
            .field("DeviceMacId", &t.device_mac_id)
            .field("MeterMacId", &t.meter_mac_id)
            .field("UTCTime", self.time(&t.utc_time))
            .field("LocalTime", self.time(&t.local_time))
            .field("Port", &t.port)
    }
}

/// Best-effort decimal of a counter field
fn count(field: &str) -> String {
    to_decimal_int(field).to_string()
}

/// `raw scaled`, e.g. `1069     1.069`
fn raw_and_scaled(
    raw: &str,
    scaled: &eagle_codec::Result<f32>,
    precision: DisplayPrecision,
) -> String {
    format!("{} {}", count(raw), format_scaled(scaled, precision))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn renderer() -> ReportRenderer {
        ReportRenderer::new(EpochConverter::new(), TimeZoneMode::Utc)
    }

    #[test]
    fn test_block_layout() {
        let mut out = String::new();
        RecordBlock::new("TimeCluster")
            .field("DeviceMacId", "0x01")
            .field("Port", "/dev/ttyUSB0")
            .write_to(&mut out);

        let expected = "\n\
TimeCluster               DeviceMacId          0x01\n                          Port                 /dev/ttyUSB0\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_long_labels_widen_column() {
        let mut out = String::new();
        RecordBlock::new("BlockPriceDetail")
            .field("DeviceMacId", "@1")
            .field("BlockPeriodConsumptionMultiplier", "@2")
            .write_to(&mut out);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].find("@1"), Some(26 + 33));
        assert_eq!(lines[2].find("@2"), Some(26 + 33));
    }

    #[test]
    fn test_empty_packet() {
        assert_eq!(renderer().render(&Packet::default()), EMPTY_REPORT);
    }

    #[test]
    fn test_demand_values() {
        let packet = Packet {
            demand: Some(InstantaneousDemand {
                time_stamp: "0x1C96BB5D".to_string(),
                demand: "0x00042d".to_string(),
                multiplier: "0x00000001".to_string(),
                divisor: "0x000003e8".to_string(),
                digits_right: "0x03".to_string(),
                digits_left: "0x06".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let report = renderer().render(&packet);
        assert!(report.contains("TimeStamp            2015-03-14 09:26:53 +0000 UTC\n"));
        assert!(report.contains("Demand               1069     1.069\n"));
        assert!(report.contains("Divisor              1000\n"));
    }

    #[test]
    fn test_conversion_errors_are_inlined() {
        let packet = Packet {
            poll: Some(FastPollStatus {
                frequency: "fast".to_string(),
                end_time: "soon".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let report = renderer().render(&packet);
        assert!(report.contains("Frequency            -1\n"));
        assert!(report.contains("EndTime              Invalid hex value soon\n"));
    }

    #[test]
    fn test_price_uses_trailing_digits() {
        let packet = Packet {
            price: Some(PriceCluster {
                price: "0x0000000e".to_string(),
                trailing_digits: "0x02".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let report = renderer().render(&packet);
        assert!(report.contains("Price                14 0.14\n"));
    }

    #[test]
    fn test_history_entries_render_in_order() {
        let entry = |ts: &str| Summation {
            time_stamp: ts.to_string(),
            ..Default::default()
        };
        let packet = Packet {
            history: Some(HistoryData {
                summations: vec![entry("0x00000000"), entry("0x0000003C")],
            }),
            ..Default::default()
        };

        let report = renderer().render(&packet);
        let first = report.find("2000-01-01 00:00:00").unwrap();
        let second = report.find("2000-01-01 00:01:00").unwrap();
        assert!(first < second);
        assert_eq!(report.matches("CurrentSummation ").count(), 2);
        assert!(report.starts_with(&format!("\n{}\n\nCurrentSummation ", HISTORY_BANNER)));
    }

    #[test]
    fn test_empty_history_still_renders() {
        let packet = Packet::from_xml("<rainforest><HistoryData/></rainforest>").unwrap();
        assert_eq!(packet.kinds(), vec![crate::records::RecordKind::HistoryData]);

        let report = renderer().render(&packet);
        assert_ne!(report, EMPTY_REPORT);
        assert_eq!(report, format!("\n{}\n", HISTORY_BANNER));
    }
}
