//! Structured logging setup.
//!
//! The library itself only emits `tracing` events. Applications embedding it
//! call [`init_logging`] once (or install their own subscriber).

use crate::config::LoggingConfig;
use crate::error::{MultiaddrError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set. Returns a
/// `ConfigError` if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_ascii_lowercase()));

    let installed = if config.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    installed.map_err(|e| {
        MultiaddrError::ConfigError(format!("Failed to install log subscriber: {e}"))
    })?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}
