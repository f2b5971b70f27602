//! Storage traits and error types
//!
//! This module defines the trait interface for profile store backends and
//! associated error types.

use crate::api::{Identity, Profile};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent keyed cache of fetched profiles
///
/// Implementations are shared between foreground requests and the background
/// gatherer, so every method takes `&self` and must be safe to call from several
/// tasks at once. Writes are single-record upserts keyed by Identity; concurrent
/// writes of the same Identity resolve to last-write-wins.
pub trait ProfileStore: Send + Sync {
    /// Looks up a cached profile
    fn find(&self, id: &Identity) -> StorageResult<Option<Profile>>;

    /// Checks whether a profile is cached without loading it
    fn exists(&self, id: &Identity) -> StorageResult<bool>;

    /// Inserts or replaces a profile
    fn save(&self, profile: &Profile) -> StorageResult<()>;

    /// Returns an arbitrary cached Identity, or `None` if the store is empty
    fn any_identity(&self) -> StorageResult<Option<Identity>>;

    /// Counts cached profiles
    fn count_profiles(&self) -> StorageResult<u64>;

    /// Counts cached profiles with at least one ban on record
    fn count_banned(&self) -> StorageResult<u64>;
}
