//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read the TOML configuration file
//! - Parse TOML into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//! - Fill values the file left empty from `AppConfig::with_system_defaults`
//!
//! `load_config` itself accepts whatever is in the file. Only
//! `resolve_config` decides what an empty value means.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bi_core::config::AppConfig;

const APP_DIR_NAME: &str = "brainink";

/// Load configuration from a TOML file.
///
/// **No validation is performed**: an empty base URL or a zero limit is
/// returned as-is.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `<config dir>/brainink/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. The default path may be absent, in which case
/// the system defaults are used as-is.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::with_system_defaults(default_data_dir());
    let loaded = match explicit {
        Some(path) => Some(load_config(path.to_path_buf())?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(load_config(path)?),
            _ => None,
        },
    };
    Ok(match loaded {
        Some(config) => fill_missing(config, defaults),
        None => defaults,
    })
}

fn fill_missing(mut config: AppConfig, defaults: AppConfig) -> AppConfig {
    if config.api_base_url.trim().is_empty() {
        config.api_base_url = defaults.api_base_url;
    }
    if config.request_timeout_secs == 0 {
        config.request_timeout_secs = defaults.request_timeout_secs;
    }
    if config.selection_limit == 0 {
        config.selection_limit = defaults.selection_limit;
    }
    if config.log_dir.as_os_str().is_empty() {
        config.log_dir = defaults.log_dir;
    }
    config
}
