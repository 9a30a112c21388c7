//! `decode` command: gateway documents to reports

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use eagle_codec::EpochConverter;
use eagle_model::{Packet, ReportRenderer};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Name used for stdin in logs and headers
const STDIN_NAME: &str = "-";

/// Decode every input, print the results, return how many failed
pub fn handle(
    files: &[PathBuf],
    format: OutputFormat,
    renderer: &ReportRenderer,
    converter: &EpochConverter,
) -> Result<usize> {
    let inputs: Vec<&Path> = if files.is_empty() {
        vec![Path::new(STDIN_NAME)]
    } else {
        files.iter().map(PathBuf::as_path).collect()
    };
    let show_headers = inputs.len() > 1 && format == OutputFormat::Text;

    let mut failed = 0;
    for input in inputs {
        let source = input.display().to_string();
        let result = read_input(input)
            .and_then(|text| decode_document(&text, &source, format, renderer, converter));

        match result {
            Ok(output) => {
                if show_headers {
                    println!("{}", format!("==> {} <==", source).bright_blue().bold());
                }
                println!("{}", output);
                info!(source = %source, "decoded");
            },
            Err(e) => {
                failed += 1;
                error!(source = %source, error = %format!("{:#}", e), "decode failed");
                eprintln!("{} {}: {:#}", "[FAIL]".red(), source, e);
            },
        }
    }

    Ok(failed)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIN_NAME) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Decode one document into the requested output format
pub fn decode_document(
    text: &str,
    source: &str,
    format: OutputFormat,
    renderer: &ReportRenderer,
    converter: &EpochConverter,
) -> Result<String> {
    let packet = Packet::from_xml(text)?;

    match format {
        OutputFormat::Text => Ok(renderer.render(&packet)),
        OutputFormat::Json => {
            let kinds: Vec<&str> = packet.kinds().iter().map(|k| k.as_str()).collect();
            let document = serde_json::json!({
                "source": source,
                "mac_id": packet.mac_id,
                "records": kinds,
                "readings": packet.readings(converter),
            });
            Ok(serde_json::to_string_pretty(&document)?)
        },
    }
}
