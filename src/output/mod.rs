//! Output module for reporting on the profile store
//!
//! This module handles:
//! - Loading aggregate counts from the store
//! - Printing them for the `stats` command

pub mod stats;

pub use stats::{load_statistics, print_statistics, StoreStatistics};
