//! eagle-report - Rainforest Eagle packet decoder
//!
//! Turns the XML documents an Eagle gateway emits into readable reports,
//! converts single fields and builds local API requests.

mod config;
mod convert;
mod decode;
mod request;

use crate::config::{load_config, OutputFormat};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use eagle_codec::{EpochConverter, TimeZoneMode};
use eagle_model::ReportRenderer;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eagle-report")]
#[command(about = "Decode Rainforest Eagle packets into readable reports")]
#[command(long_about = "Decode Rainforest Eagle packets into readable reports

Examples:
  eagle-report decode capture.xml                  # Text report
  eagle-report decode --format json *.xml          # Converted readings as JSON
  cat packet.xml | eagle-report decode             # Read from stdin
  eagle-report convert time 0x1C96BB5D             # Device time to UTC
  eagle-report command get_history_data --mac 0xd8d5b90000001234 \\
      --start 2015-03-14T00:00:00Z                 # Local API request")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Print timestamps in the local time zone instead of UTC
    #[arg(long, global = true)]
    local_time: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode gateway XML documents (stdin when no file is given)
    Decode {
        /// Input files
        files: Vec<PathBuf>,

        /// Output format (default from config: text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Convert a single field value
    Convert {
        #[command(subcommand)]
        command: convert::ConvertCommands,
    },

    /// Print a LocalCommand request
    Command {
        /// Command name, e.g. get_history_data
        name: String,

        /// Device MAC id
        #[arg(long)]
        mac: String,

        /// Start time (RFC 3339)
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// End time (RFC 3339)
        #[arg(long)]
        end: Option<DateTime<Utc>>,

        /// Polling frequency in seconds
        #[arg(long)]
        frequency: Option<u16>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Configure colored output
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    // Initialize logging (RUST_LOG wins over config)
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "configuration loaded");

    let zone = if cli.local_time {
        TimeZoneMode::Local
    } else {
        config.time_zone
    };
    let converter = EpochConverter::new();
    debug!(offset = converter.offset().seconds(), "device epoch offset");

    match cli.command {
        Commands::Decode { files, format } => {
            let renderer = ReportRenderer::new(converter, zone);
            let format = format.unwrap_or(config.format);
            let failed = decode::handle(&files, format, &renderer, &converter)?;
            if failed > 0 {
                bail!("{} document(s) failed to decode", failed);
            }
        },
        Commands::Convert { command } => {
            convert::handle(&command, &converter, zone)?;
        },
        Commands::Command {
            name,
            mac,
            start,
            end,
            frequency,
        } => {
            let xml = request::build_request(&name, &mac, start, end, frequency, &converter)?;
            println!("{}", xml);
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decode_args() {
        let cli = Cli::parse_from(["eagle-report", "decode", "-f", "json", "a.xml", "b.xml"]);
        match cli.command {
            Commands::Decode { files, format } => {
                assert_eq!(files.len(), 2);
                assert_eq!(format, Some(OutputFormat::Json));
            },
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_parse_command_times() {
        let cli = Cli::parse_from([
            "eagle-report",
            "--local-time",
            "command",
            "get_history_data",
            "--mac",
            "0x01",
            "--start",
            "2015-03-14T09:26:53Z",
        ]);
        assert!(cli.local_time);
        match cli.command {
            Commands::Command { start, end, .. } => {
                assert_eq!(start.map(|t| t.timestamp()), Some(1_426_325_213));
                assert!(end.is_none());
            },
            _ => panic!("expected command"),
        }
    }
}
