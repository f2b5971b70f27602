//! Configuration module for Squad-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use squad_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Batch delay: {}ms", config.gathering.delay_between_batches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, BannedConfig, Config, CrawlerConfig, GatheringConfig, LimiterConfig,
    RateLimitsConfig, ServerConfig, StorageConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, API_KEY_ENV};
pub use validation::validate;
