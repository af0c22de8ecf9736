//! Core infrastructure layer for the CourseDeck learning platform.
//!
//! This crate provides the foundational pieces shared by the CourseDeck
//! domain crates: configuration loading, logging initialization, and the
//! common error types. It contains no learning-platform semantics of its
//! own; those live in `coursedeck-domain`.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, LoggingConfig, NotificationConfig};
pub use error::{ConfigError, CoreError};
