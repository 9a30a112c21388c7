//! `command` command: build local API requests

use anyhow::Result;
use chrono::{DateTime, Utc};
use eagle_codec::EpochConverter;
use eagle_model::LocalCommand;
use tracing::debug;

pub fn build_request(
    name: &str,
    mac_id: &str,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    frequency: Option<u16>,
    converter: &EpochConverter,
) -> Result<String> {
    let mut command = LocalCommand::new(name, mac_id);
    if let Some(start) = start {
        command = command.with_start_time(converter, start)?;
    }
    if let Some(end) = end {
        command = command.with_end_time(converter, end)?;
    }
    if let Some(seconds) = frequency {
        command = command.with_frequency(seconds);
    }

    debug!(?command, "built local command");
    Ok(command.to_xml()?)
}
