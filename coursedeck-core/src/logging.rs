//! Logging setup for CourseDeck core.
//!
//! Built on the `tracing` ecosystem. Provides a minimal stderr logger for
//! tests and early startup, and a configuration-driven console logger
//! supporting text and JSON output.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::CoreError;

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests and for early application startup before the full
/// configuration is available. Filters via the `RUST_LOG` environment
/// variable, defaulting to "info". Errors (e.g. a logger is already
/// installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Initializes the global logger from a [`LoggingConfig`].
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoreError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|err| {
        CoreError::LoggingInitialization(format!(
            "invalid log level '{}': {}",
            config.level, err
        ))
    })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(atty::is(atty::Stream::Stdout));

    let result = match config.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    result.map_err(|err| CoreError::LoggingInitialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so
    // these exercise the fallible paths rather than asserting on output.

    #[test]
    fn init_minimal_logging_is_idempotent() {
        init_minimal_logging();
        init_minimal_logging();
    }

    #[test]
    fn init_logging_rejects_invalid_level() {
        let config = LoggingConfig {
            level: "[invalid".to_string(),
            format: "text".to_string(),
        };
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, CoreError::LoggingInitialization(_)));
    }
}
