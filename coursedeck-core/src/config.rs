//! Configuration management for CourseDeck core.
//!
//! Defines the configuration schema for the platform and the loading
//! logic for TOML configuration files. The root structure is
//! [`CoreConfig`], which aggregates a `[logging]` section
//! ([`LoggingConfig`]) and a `[notifications]` section
//! ([`NotificationConfig`]). Missing sections or fields fall back to
//! defaults; unknown fields are rejected during deserialization.
//!
//! # Examples
//!
//! ```
//! use coursedeck_core::config::CoreConfig;
//!
//! let config: CoreConfig = toml::from_str(r#"
//! [logging]
//! level = "debug"
//!
//! [notifications]
//! refresh_interval_secs = 15
//! "#).unwrap();
//! assert_eq!(config.logging.level, "debug");
//! assert_eq!(config.notifications.page_limit, 10);
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{ConfigError, CoreError};

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    10
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

/// Configuration for the logging subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level to record. Valid values (case-insensitive):
    /// "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Console output format, "text" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Configuration for the notification subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// How often the remote-backed notification cache is revalidated in
    /// the background, in seconds.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Page size requested from the remote notification service.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Base URL of the remote notification service, without a trailing
    /// slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl NotificationConfig {
    /// The background revalidation interval as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            page_limit: default_page_limit(),
            api_base_url: default_api_base_url(),
        }
    }
}

/// Root configuration structure for the CourseDeck platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Configuration for the notification subsystem.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl CoreConfig {
    /// Loads and validates the configuration from a TOML file.
    ///
    /// Read failures map to [`ConfigError::ReadError`], parse failures to
    /// [`ConfigError::ParseError`], and invalid values to
    /// [`ConfigError::ValidationError`].
    pub fn load_from_path(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CoreConfig = toml::from_str(&raw).map_err(ConfigError::ParseError)?;
        config.validate()?;
        debug!("loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validates field values that the TOML schema alone cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.logging.level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown log level '{}', expected one of {:?}",
                self.logging.level, LEVELS
            )));
        }

        let format = self.logging.format.to_lowercase();
        if format != "text" && format != "json" {
            return Err(ConfigError::ValidationError(format!(
                "unknown log format '{}', expected 'text' or 'json'",
                self.logging.format
            )));
        }

        if self.notifications.refresh_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "notifications.refresh_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.notifications.page_limit == 0 {
            return Err(ConfigError::ValidationError(
                "notifications.page_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
