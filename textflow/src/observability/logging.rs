//! Log subscriber setup built on `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application, which can use [`init_logging`] for the
//! common case.

use crate::config::LoggingConfig;
use crate::errors::TextflowError;
use tracing_subscriber::EnvFilter;

/// Builds the event filter for a logging configuration.
///
/// A non-empty `RUST_LOG` environment variable takes precedence over the
/// configured level.
///
/// # Errors
///
/// Returns a configuration error if the directives cannot be parsed.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TextflowError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => from_env,
        _ => config.level.clone(),
    };

    EnvFilter::try_new(&directives)
        .map_err(|err| TextflowError::Config(format!("invalid log filter '{directives}': {err}")))
}

/// Installs a global fmt subscriber.
///
/// # Errors
///
/// Returns a configuration error if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TextflowError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|err| TextflowError::Config(format!("failed to install logger: {err}")))
}
