//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every setting has a default so the demo
//! runs with no environment at all.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the single durable-storage key holding the history.
    pub history_path: PathBuf,
    pub log_level: Level,
    /// Simulated latency of the mock summarization gateway.
    pub summarize_delay: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let history_path = std::env::var("HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./summary-history.json"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let delay_ms = match std::env::var("SUMMARIZE_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "SUMMARIZE_DELAY_MS".to_string(),
                    format!("'{}' is not a number of milliseconds", raw),
                )
            })?,
            Err(_) => 2000,
        };

        Ok(Self {
            history_path,
            log_level,
            summarize_delay: Duration::from_millis(delay_ms),
        })
    }
}
