use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::args::Args;
use crate::dates::{DateParser, DEFAULT_DATE_FORMATS};
use crate::domain::KeyMode;
use crate::record::ColumnMap;
use crate::trend::{CountMode, TrendOptions};

pub const DEFAULT_CONFIG_FILE: &str = "scantrend.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Leave the previous snapshot in place.
    #[default]
    Keep,
    /// Drop the previous snapshot.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key_mode: KeyMode,
    pub count_mode: CountMode,
    /// Skip rows with an empty scan date instead of bucketing them.
    pub skip_missing_dates: bool,
    /// chrono formats tried in order; `rfc3339` selects RFC 3339 parsing.
    pub date_formats: Vec<String>,
    /// Port-status substring that marks a row as active.
    pub active_marker: String,
    pub on_parse_failure: FailurePolicy,
    pub workers: Option<usize>,
    pub columns: ColumnMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::default(),
            count_mode: CountMode::default(),
            skip_missing_dates: true,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            active_marker: "open".to_string(),
            on_parse_failure: FailurePolicy::default(),
            workers: None,
            columns: ColumnMap::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {:?}", path);
                }
                path
            }
            None => {
                let default_file = Path::new(DEFAULT_CONFIG_FILE);
                if !default_file.exists() {
                    info!(action = "load", component = "config", "Using default settings");
                    return Ok(Self::default());
                }
                default_file
            }
        };

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let settings = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;

        info!(action = "loaded", component = "config", file_path = ?path, "Loaded settings from file");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.date_formats.is_empty() {
            anyhow::bail!("date_formats must list at least one format");
        }
        if settings.active_marker.trim().is_empty() {
            anyhow::bail!("active_marker must not be empty");
        }
        if settings.workers == Some(0) {
            anyhow::bail!("workers must be greater than 0");
        }
        Ok(settings)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(key_mode) = args.key_mode {
            self.key_mode = key_mode;
        }
        if let Some(count_mode) = args.count_mode {
            self.count_mode = count_mode;
        }
        if args.keep_missing_dates {
            self.skip_missing_dates = false;
        }
        if !args.date_format.is_empty() {
            self.date_formats = args.date_format.clone();
        }
        if let Some(marker) = &args.active_marker {
            self.active_marker = marker.clone();
        }
        if let Some(policy) = args.on_parse_failure {
            self.on_parse_failure = policy;
        }
        if args.workers.is_some() {
            self.workers = args.workers;
        }
    }

    pub fn trend_options(&self) -> TrendOptions {
        TrendOptions {
            key_mode: self.key_mode,
            count_mode: self.count_mode,
            skip_missing_dates: self.skip_missing_dates,
            active_marker: self.active_marker.clone(),
            dates: DateParser::new(self.date_formats.clone()),
            workers: self.workers,
        }
    }
}
