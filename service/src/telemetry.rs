//! Logging setup.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the embedding application. [`init_tracing`] is a convenience for
//! applications that take their log level from [`LoggingConfig`].

use tracing_subscriber::{filter::ParseError, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Build the filter for `config.level`.
///
/// # Errors
/// Returns `TelemetryError::Filter` if the level is not a valid directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(config.level.trim())?)
}

/// Install a global `fmt` subscriber filtered at the configured level.
///
/// # Errors
/// Returns an error if the level cannot be parsed or a global subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
        }
    }

    #[test]
    fn test_filter_accepts_levels_and_directives() {
        for level in ["debug", "info", "warn", "error", "assemblee_client=trace,info"] {
            assert!(env_filter(&logging(level)).is_ok(), "level '{level}'");
        }
    }

    #[test]
    fn test_filter_rejects_garbage() {
        let result = env_filter(&logging("assemblee_client=loud"));
        assert!(matches!(result, Err(TelemetryError::Filter(_))));
    }

    #[test]
    fn test_second_init_fails() {
        // The first call may lose the race against another test; the second
        // one can never succeed.
        let _ = init_tracing(&logging("warn"));
        let result = init_tracing(&logging("warn"));
        assert!(matches!(result, Err(TelemetryError::Init(_))));
    }
}
