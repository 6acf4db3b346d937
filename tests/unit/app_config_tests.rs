/*!
 * Tests for application configuration
 */

use anyhow::Result;
use capsync::app_config::{Config, LogLevel};
use capsync::formats::Format;
use crate::common;

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::from_file(&path)?, config);
    Ok(())
}

/// Test that save and load preserve every field
#[test]
fn test_save_thenFromFile_shouldPreserveSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.source_language = "fr".to_string();
    config.segmentation.max_chars_per_subtitle = 42;
    config.timing.chars_per_second = 12.5;
    config.output.format = Format::Srt;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    assert_eq!(Config::load_or_create(&path)?, config);
    Ok(())
}

/// Test that the format accepts both spellings in JSON
#[test]
fn test_deserialize_withWebvttAlias_shouldParse() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"output": {"format": "webvtt"}, "log_level": "warn"}"#)?;

    assert_eq!(config.output.format, Format::WebVtt);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Warn);
    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test validation of the character budget
#[test]
fn test_validate_withZeroCharacterBudget_shouldFail() {
    let mut config = Config::default();
    config.segmentation.max_chars_per_subtitle = 0;

    assert!(config.validate().is_err());
}
