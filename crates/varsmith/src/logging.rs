//! Tracing subscriber setup.
//!
//! Library crates only emit `tracing` events; the binary decides where they
//! go. Logs are written to stderr so stdout stays free for the summary.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the event filter. `RUST_LOG` overrides the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !directives.trim().is_empty() {
            return Ok(EnvFilter::try_new(directives)?);
        }
    }
    Ok(EnvFilter::try_new(&config.level)?)
}

/// Installs the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    use tracing_subscriber::{fmt, prelude::*};

    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!(level = %config.level, json = config.json, "logging initialized");
    Ok(())
}
