// src/config.rs

//! Configuration loading utilities.
//!
//! The CLI reads `data/config.toml` relative to the working directory and
//! then applies `RECONNEWS_*` environment overrides.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::log;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// Load configuration from a TOML file with environment overrides.
///
/// Falls back to defaults if loading fails.
pub fn load_config(path: &Path) -> Config {
    let mut config = if path.exists() {
        Config::load_or_default(path)
    } else {
        log::info(&format!("No config file at {path:?}; using defaults"));
        Config::default()
    };
    config.apply_env();
    config
}

/// Load, override and validate configuration.
///
/// Unlike [`load_config`], a present but unreadable file is an error.
pub fn load_validated(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        Config::load(path)
            .map_err(|e| AppError::config(format!("Failed to load {path:?}: {e}")))?
    } else {
        log::info(&format!("No config file at {path:?}; checking defaults"));
        Config::default()
    };
    config.apply_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml"));
        assert_eq!(config.cache.ttl_minutes, 30);
    }

    #[test]
    fn test_invalid_file_falls_back_but_fails_validation_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[cache]\nttl_minutes = \"soon\"\n").unwrap();

        assert_eq!(load_config(&path).cache.ttl_minutes, 30);
        assert!(matches!(load_validated(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(load_validated(&path), Err(AppError::Validation(_))));
    }
}
