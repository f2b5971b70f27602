//! Squad-Scout: a rate-limited player discovery engine
//!
//! This crate discovers player profiles from the Leetify analytics API by walking
//! the teammate graph outward from seed players, pulls candidates from a banned
//! player directory, caches everything in SQLite, and runs both generators in the
//! background under operator control.

pub mod api;
pub mod config;
pub mod crawler;
pub mod output;
pub mod server;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Squad-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] api::FetchError),

    #[error("Gathering control error: {0}")]
    Control(#[from] crawler::ControlError),

    #[error("Batch task failed: {0}")]
    Batch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Squad-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{FetchError, Identity, Profile};
pub use config::Config;
pub use state::{GatheringMode, GatheringStatus, SchedulerState};
