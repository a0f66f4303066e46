//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::i18n::Locale;
use crate::utils::errors::{RankBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_storage_config(&settings.storage)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.data_dir.is_empty() {
        return Err(RankBuddyError::Config(
            "Storage data directory is required".to_string()
        ));
    }

    if config.prefix.is_empty() {
        return Err(RankBuddyError::Config(
            "Storage key prefix is required".to_string()
        ));
    }

    Ok(())
}

/// Validate localization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_locale.is_empty() {
        return Err(RankBuddyError::Config(
            "Default locale is required".to_string()
        ));
    }

    if config.supported_locales.is_empty() {
        return Err(RankBuddyError::Config(
            "At least one supported locale is required".to_string()
        ));
    }

    if !config.supported_locales.contains(&config.default_locale) {
        return Err(RankBuddyError::Config(
            "Default locale must be in supported locales list".to_string()
        ));
    }

    for code in &config.supported_locales {
        if code.parse::<Locale>().is_err() {
            return Err(RankBuddyError::Config(
                format!("Unrecognized locale code in supported locales: {}", code)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RankBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RankBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
