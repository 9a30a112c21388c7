//! Report configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. Config file given with `--config` (YAML, TOML or JSON by extension)
//! 3. `EAGLE_` prefixed environment variables (e.g. `EAGLE_TIME_ZONE=local`)
//!
//! Command line flags are applied on top by the caller.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use eagle_codec::TimeZoneMode;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EAGLE_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width text report
    #[default]
    Text,
    /// Converted readings as JSON
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Zone for printed timestamps
    #[serde(default)]
    pub time_zone: TimeZoneMode,

    /// Default output format of `decode`
    #[serde(default)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colored headers and errors
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneMode::default(),
            format: OutputFormat::default(),
            log_level: default_log_level(),
            color: true,
        }
    }
}

/// Load configuration from defaults, an optional file and the environment
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let mut figment = Figment::from(Serialized::defaults(ReportConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        figment = match extension {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            "json" => figment.merge(Json::file(path)),
            _ => bail!("Unsupported config file format: {}", path.display()),
        };
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Failed to load configuration")
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config(None).unwrap();
            assert_eq!(config, ReportConfig::default());
            assert_eq!(config.time_zone, TimeZoneMode::Utc);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "time_zone: local\nformat: json\ncolor: false").unwrap();

        figment::Jail::expect_with(|_jail| {
            let config = load_config(Some(file.path())).unwrap();
            assert_eq!(config.time_zone, TimeZoneMode::Local);
            assert_eq!(config.format, OutputFormat::Json);
            assert!(!config.color);
            assert_eq!(config.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"info\"\nformat = \"json\"").unwrap();

        figment::Jail::expect_with(|jail| {
            jail.set_env("EAGLE_LOG_LEVEL", "debug");
            let config = load_config(Some(file.path())).unwrap();
            assert_eq!(config.log_level, "debug");
            assert_eq!(config.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_bad_paths() {
        assert!(load_config(Some(Path::new("/nonexistent/eagle.yaml"))).is_err());

        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }
}
