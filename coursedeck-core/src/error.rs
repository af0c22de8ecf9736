//! Error handling for the CourseDeck core layer.
//!
//! This module defines the error types shared across the core crate using
//! `thiserror`. The main type is [`CoreError`], which wraps the more
//! specific [`ConfigError`] for configuration failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the CourseDeck platform.
///
/// Used as the common error type for infrastructure-level operations,
/// usually by wrapping a more specific error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while initializing the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// General I/O errors not covered by a more specific variant.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed as TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid after successful parsing.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
