use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::formats::Format;
use crate::segmentation::DEFAULT_MAX_CHARS_PER_SUBTITLE;
use crate::timing::TimingConfig;

/// Application configuration module
/// This module handles loading, validating and saving the caption
/// generation settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language of the narration text (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Text segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Reading-speed timing settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text segmentation configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    // @field: Character budget per caption
    #[serde(default = "default_max_chars_per_subtitle")]
    pub max_chars_per_subtitle: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_chars_per_subtitle: default_max_chars_per_subtitle(),
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    // @field: Caption file format written by default
    #[serde(default)]
    pub format: Format,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_max_chars_per_subtitle() -> usize {
    DEFAULT_MAX_CHARS_PER_SUBTITLE
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;

        if self.segmentation.max_chars_per_subtitle == 0 {
            return Err(anyhow!("max_chars_per_subtitle must be greater than 0"));
        }

        let timing = &self.timing;
        if !(timing.chars_per_second > 0.0) || !timing.chars_per_second.is_finite() {
            return Err(anyhow!("chars_per_second must be a positive number, got {}", timing.chars_per_second));
        }

        if !(timing.min_duration > 0.0) || !timing.min_duration.is_finite() {
            return Err(anyhow!("min_duration must be a positive number, got {}", timing.min_duration));
        }

        if !(timing.max_duration >= timing.min_duration) || !timing.max_duration.is_finite() {
            return Err(anyhow!(
                "max_duration ({}) must not be less than min_duration ({})",
                timing.max_duration,
                timing.min_duration
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            segmentation: SegmentationConfig::default(),
            timing: TimingConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
