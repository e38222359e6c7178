//! Tracing subscriber setup.
//!
//! The library crates only emit `tracing` events. Hosts that do not install a
//! subscriber of their own can call [`init_logging`] once at startup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The fallback filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install a human readable subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used
/// (for example `"ragbench_evals=debug"`).
pub fn init_logging(default_filter: &str) -> Result<(), LoggingError> {
    init_logging_with(LogFormat::Pretty, default_filter)
}

/// Install a subscriber with the given output format.
pub fn init_logging_with(format: LogFormat, default_filter: &str) -> Result<(), LoggingError> {
    let filter = build_filter(default_filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(?format, "Logging initialized");
    Ok(())
}

fn build_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_filter)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("ragbench_evals=debug,info").is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        // The first call may race with other tests; only the second must fail.
        let _ = init_logging("warn");
        let err = init_logging("warn").unwrap_err();
        assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
    }
}
