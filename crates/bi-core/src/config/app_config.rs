//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation inside `from_toml`
//!
//! > **This module contains data only.** Missing keys become empty values;
//! > the shell decides what an empty value means.

use std::path::PathBuf;

/// Public BrainInk backend.
pub const DEFAULT_API_BASE_URL: &str = "https://brainink-backend.onrender.com";

/// Images accepted from a single gallery pick.
pub const DEFAULT_SELECTION_LIMIT: usize = 10;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL (may be empty - this is a fact, not an error)
    pub api_base_url: String,

    /// Request timeout in seconds. `0` leaves the HTTP client default.
    pub request_timeout_secs: u64,

    /// Maximum images taken from one picker batch. `0` means unset.
    pub selection_limit: usize,

    /// Directory for the rolling log file (empty = stdout only)
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation or default
    /// value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: toml_value
                .get("api")
                .and_then(|a| a.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            selection_limit: toml_value
                .get("upload")
                .and_then(|u| u.get("selection_limit"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as usize,
            log_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            selection_limit: 0,
            log_dir: PathBuf::new(),
        }
    }

    /// Production defaults.
    ///
    /// `data_dir` should be computed by the caller with platform-specific
    /// logic (e.g. the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 0,
            selection_limit: DEFAULT_SELECTION_LIMIT,
            log_dir: data_dir.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_every_section() {
        let toml_str = r#"
            [api]
            base_url = "http://localhost:8000"
            timeout_secs = 30

            [upload]
            selection_limit = 5

            [logging]
            dir = "/var/log/brainink"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.selection_limit, 5);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/brainink"));
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[api]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_with_system_defaults_points_logs_into_data_dir() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/data/brainink"));
        assert_eq!(config.log_dir, PathBuf::from("/data/brainink/logs"));
        assert_eq!(config.selection_limit, DEFAULT_SELECTION_LIMIT);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
