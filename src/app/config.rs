use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::daily::{DEFAULT_MAX_COUNT_DIFFERENCE, DEFAULT_MAX_ROUNDS, PairingConfig};
use crate::domain::Denylist;
use crate::pipeline::{DEFAULT_TOP_PER_CATEGORY, GenerationOptions};

use super::logging::LogLevel;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level CLI.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the full generation pipeline and write a dataset snapshot
    Generate(GenerateConfig),
    /// Produce (or fetch the cached) daily challenge for a date
    Daily(DailyConfig),
}

/// Settings for one generation run. Every game constant the pipeline uses is
/// an overridable argument here, so tests can run against tiny synthetic
/// exports.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Base URL of the export server
    #[arg(long, env = "EXPORT_BASE_URL", default_value = "https://e621.net/db_export")]
    pub base_url: String,

    /// Export date to process (defaults to yesterday UTC, the newest
    /// published export)
    #[arg(long, env = "EXPORT_DATE")]
    pub export_date: Option<String>,

    /// Directory for cached .csv.gz downloads
    #[arg(long, env = "CACHE_DIR", default_value = "csv")]
    pub cache_dir: PathBuf,

    /// Directory the snapshot files are written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "resources")]
    pub output_dir: PathBuf,

    /// Tags kept per visible category
    #[arg(long, env = "TOP_PER_CATEGORY", default_value = "1000")]
    pub top_per_category: usize,

    /// Accept gif previews in addition to png/jpg
    #[arg(long, env = "ALLOW_GIF")]
    pub allow_gif: bool,

    /// Never touch the network; fail if exports are not cached
    #[arg(long, env = "OFFLINE")]
    pub offline: bool,

    /// Replaces the built-in denylist with one name per line from this file
    #[arg(long, env = "DENYLIST_FILE")]
    pub denylist_file: Option<PathBuf>,

    /// Configuration file path (optional; replaces all of the above)
    #[serde(skip)]
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://e621.net/db_export".to_string(),
            export_date: None,
            cache_dir: PathBuf::from("csv"),
            output_dir: PathBuf::from("resources"),
            top_per_category: DEFAULT_TOP_PER_CATEGORY,
            allow_gif: false,
            offline: false,
            denylist_file: None,
            config_file: None,
        }
    }
}

impl GenerateConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// The export date to process: the configured one (validated) or
    /// yesterday UTC, since upstream publishes each day's export overnight.
    pub fn resolved_export_date(&self) -> Result<String, ConfigError> {
        match &self.export_date {
            Some(date) => validate_date(date),
            None => Ok(yesterday_utc()),
        }
    }

    pub fn generation_options(&self) -> Result<GenerationOptions, ConfigError> {
        let denylist = match &self.denylist_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Denylist::new(
                    contents
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty()),
                )
            }
            None => Denylist::default(),
        };
        Ok(GenerationOptions {
            top_per_category: self.top_per_category,
            denylist,
            allow_gif: self.allow_gif,
            ..GenerationOptions::default()
        })
    }
}

/// Settings for serving/producing a daily challenge.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct DailyConfig {
    /// Dataset snapshot to draw the pool from
    #[arg(long, env = "DATASET_PATH", default_value = "resources/tags.bin")]
    pub dataset_path: PathBuf,

    /// Challenge date (defaults to today UTC)
    #[arg(long, env = "CHALLENGE_DATE")]
    pub challenge_date: Option<String>,

    /// Directory the per-date challenge files are stored in
    #[arg(long, env = "DAILY_STORE_DIR", default_value = "daily")]
    pub store_dir: PathBuf,

    /// Pairs per challenge
    #[arg(long, env = "MAX_ROUNDS", default_value = "10")]
    pub max_rounds: usize,

    /// Maximum popularity-count difference within a pair
    #[arg(long, env = "MAX_COUNT_DIFFERENCE", default_value = "40000")]
    pub max_count_difference: u64,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("resources/tags.bin"),
            challenge_date: None,
            store_dir: PathBuf::from("daily"),
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_count_difference: DEFAULT_MAX_COUNT_DIFFERENCE,
        }
    }
}

impl DailyConfig {
    /// The challenge date: the configured one (validated) or today UTC. All
    /// users on a given UTC day share this value, and through it the seed.
    pub fn resolved_challenge_date(&self) -> Result<String, ConfigError> {
        match &self.challenge_date {
            Some(date) => validate_date(date),
            None => Ok(today_utc()),
        }
    }

    pub fn pairing_config(&self) -> PairingConfig {
        PairingConfig {
            max_rounds: self.max_rounds,
            max_count_difference: self.max_count_difference,
        }
    }
}

fn validate_date(date: &str) -> Result<String, ConfigError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidDate(date.to_string()))?;
    Ok(date.to_string())
}

pub fn today_utc() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn yesterday_utc() -> String {
    (Utc::now().date_naive() - Days::new(1))
        .format(DATE_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dates_are_validated() {
        let config = GenerateConfig {
            export_date: Some("2024-06-01".to_string()),
            ..GenerateConfig::default()
        };
        assert_eq!(config.resolved_export_date().unwrap(), "2024-06-01");

        let bad = GenerateConfig {
            export_date: Some("06/01/2024".to_string()),
            ..GenerateConfig::default()
        };
        assert!(matches!(
            bad.resolved_export_date(),
            Err(ConfigError::InvalidDate(_))
        ));
    }

    #[test]
    fn default_dates_are_well_formed() {
        for date in [today_utc(), yesterday_utc()] {
            assert!(NaiveDate::parse_from_str(&date, DATE_FORMAT).is_ok());
        }
    }

    #[test]
    fn generate_config_parses_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagdle.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:8080\"\ntop_per_category = 25\noffline = true\n",
        )
        .unwrap();

        let config = GenerateConfig::from_file(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.top_per_category, 25);
        assert!(config.offline);
        assert_eq!(config.cache_dir, PathBuf::from("csv")); // default kept
    }

    #[test]
    fn denylist_file_replaces_builtin_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("denylist.txt");
        std::fs::write(&path, "mushroom\n\n  fern  \n").unwrap();

        let config = GenerateConfig {
            denylist_file: Some(path),
            ..GenerateConfig::default()
        };
        let options = config.generation_options().unwrap();
        assert!(options.denylist.contains("mushroom"));
        assert!(options.denylist.contains("fern"));
        assert!(!options.denylist.contains("gore"));
    }

    #[test]
    fn cli_args_parse_into_subcommands() {
        let config = Config::try_parse_from([
            "tagdle",
            "daily",
            "--challenge-date",
            "2024-06-01",
            "--max-rounds",
            "3",
        ])
        .unwrap();
        let Command::Daily(daily) = config.command else {
            panic!("expected daily subcommand");
        };
        assert_eq!(daily.challenge_date.as_deref(), Some("2024-06-01"));
        assert_eq!(daily.max_rounds, 3);
        assert_eq!(daily.pairing_config().max_count_difference, 40_000);
    }
}
