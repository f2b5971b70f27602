//! Statistics generation from the profile store
//!
//! This module provides functionality for extracting and displaying
//! aggregate counts over everything the gatherer has cached.

use crate::storage::{ProfileStore, StorageResult};

/// Profile store summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Number of cached profiles
    pub total_profiles: u64,

    /// Cached profiles with at least one ban on record
    pub banned_profiles: u64,
}

impl StoreStatistics {
    /// Share of cached profiles carrying a ban, as a percentage
    pub fn banned_percentage(&self) -> f64 {
        if self.total_profiles == 0 {
            0.0
        } else {
            (self.banned_profiles as f64 / self.total_profiles as f64) * 100.0
        }
    }
}

/// Loads statistics from the store
///
/// # Arguments
///
/// * `store` - The profile store to query
pub fn load_statistics(store: &dyn ProfileStore) -> StorageResult<StoreStatistics> {
    Ok(StoreStatistics {
        total_profiles: store.count_profiles()?,
        banned_profiles: store.count_banned()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Profile Store Statistics ===\n");

    println!("Overview:");
    println!("  Total profiles: {}", stats.total_profiles);
    println!(
        "  Banned profiles: {} ({:.1}%)",
        stats.banned_profiles,
        stats.banned_percentage()
    );
    println!(
        "  Clean profiles: {}",
        stats.total_profiles.saturating_sub(stats.banned_profiles)
    );
}
