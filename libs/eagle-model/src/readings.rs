//! Converted readings for machine-readable output
//!
//! Flattens the scaled values of a packet (demand, summations, price,
//! block consumption) into one list with their timestamps.

use crate::packet::Packet;
use crate::records::{RecordKind, Summation};
use chrono::{DateTime, Utc};
use eagle_codec::{compute_scaled_value, price_value, EpochConverter};
use serde::Serialize;

/// One scaled value taken from a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub record: RecordKind,
    pub field: &'static str,
    pub meter_mac_id: String,
    /// `None` when the record's timestamp did not convert
    pub timestamp: Option<DateTime<Utc>>,
    /// `None` when the value did not convert; non-finite values serialize as null
    pub value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reading {
    fn new(
        record: RecordKind,
        field: &'static str,
        meter_mac_id: &str,
        timestamp: Option<DateTime<Utc>>,
        value: eagle_codec::Result<f32>,
    ) -> Self {
        let (value, error) = match value {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            record,
            field,
            meter_mac_id: meter_mac_id.to_string(),
            timestamp,
            value,
            error,
        }
    }
}

impl Packet {
    /// Scaled readings carried by this packet
    pub fn readings(&self, converter: &EpochConverter) -> Vec<Reading> {
        let time = |hex: &str| converter.to_standard_epoch_time(hex).ok();
        let mut readings = Vec::new();

        if let Some(s) = &self.current {
            push_summation(
                &mut readings,
                RecordKind::CurrentSummationDelivered,
                s,
                time(&s.time_stamp),
            );
        }
        if let Some(history) = &self.history {
            for s in &history.summations {
                push_summation(
                    &mut readings,
                    RecordKind::CurrentSummation,
                    s,
                    time(&s.time_stamp),
                );
            }
        }
        if let Some(d) = &self.demand {
            readings.push(Reading::new(
                RecordKind::InstantaneousDemand,
                "Demand",
                &d.meter_mac_id,
                time(&d.time_stamp),
                compute_scaled_value(&d.demand, &d.multiplier, &d.divisor),
            ));
        }
        if let Some(p) = &self.price {
            readings.push(Reading::new(
                RecordKind::PriceCluster,
                "Price",
                &p.meter_mac_id,
                time(&p.time_stamp),
                price_value(&p.price, &p.trailing_digits),
            ));
        }
        if let Some(b) = &self.price_detail {
            let ts = time(&b.time_stamp);
            readings.push(Reading::new(
                RecordKind::BlockPriceDetail,
                "BlockPeriodConsumption",
                &b.meter_mac_id,
                ts,
                compute_scaled_value(
                    &b.block_period_consumption,
                    &b.block_period_consumption_multiplier,
                    &b.block_period_consumption_divisor,
                ),
            ));
            readings.push(Reading::new(
                RecordKind::BlockPriceDetail,
                "NumberOfBlocks",
                &b.meter_mac_id,
                ts,
                compute_scaled_value(&b.number_of_blocks, &b.multiplier, &b.divisor),
            ));
        }

        readings
    }
}

fn push_summation(
    readings: &mut Vec<Reading>,
    record: RecordKind,
    s: &Summation,
    timestamp: Option<DateTime<Utc>>,
) {
    readings.push(Reading::new(
        record,
        "SummationDelivered",
        &s.meter_mac_id,
        timestamp,
        compute_scaled_value(&s.summation_delivered, &s.multiplier, &s.divisor),
    ));
    readings.push(Reading::new(
        record,
        "SummationReceived",
        &s.meter_mac_id,
        timestamp,
        compute_scaled_value(&s.summation_received, &s.multiplier, &s.divisor),
    ));
}
