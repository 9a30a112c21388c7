//! `convert` command: single field conversions

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use eagle_codec::{
    compute_scaled_value, format_time, parse_signed_i32, to_decimal_int, EpochConverter,
    TimeZoneMode,
};

#[derive(Subcommand, Debug)]
pub enum ConvertCommands {
    /// Device timestamp (hex) to standard time
    Time {
        /// e.g. 0x1C96BB5D
        hex: String,
    },

    /// Standard time (RFC 3339) to the device's hex encoding
    Encode {
        /// e.g. 2015-03-14T09:26:53Z
        time: DateTime<Utc>,
    },

    /// Scaled reading: raw * multiplier / divisor
    Scale {
        raw: String,
        multiplier: String,
        divisor: String,
    },

    /// Hex field to a signed integer
    Int {
        hex: String,

        /// Lenient display parsing (auto base, -1 on failure)
        #[arg(short, long)]
        lenient: bool,
    },
}

pub fn handle(
    command: &ConvertCommands,
    converter: &EpochConverter,
    zone: TimeZoneMode,
) -> Result<()> {
    println!("{}", run(command, converter, zone)?);
    Ok(())
}

pub fn run(
    command: &ConvertCommands,
    converter: &EpochConverter,
    zone: TimeZoneMode,
) -> Result<String> {
    let output = match command {
        ConvertCommands::Time { hex } => {
            let t = converter.to_standard_epoch_time(hex)?;
            format_time(t, zone)
        },
        ConvertCommands::Encode { time } => converter.encode_device_time(*time)?,
        ConvertCommands::Scale {
            raw,
            multiplier,
            divisor,
        } => compute_scaled_value(raw, multiplier, divisor)?.to_string(),
        ConvertCommands::Int { hex, lenient } => {
            if *lenient {
                to_decimal_int(hex).to_string()
            } else {
                parse_signed_i32(hex)?.to_string()
            }
        },
    };
    Ok(output)
}
