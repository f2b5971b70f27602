//! Storage module for persisting discovered profiles
//!
//! This module handles all database operations for the gatherer, including:
//! - SQLite database initialization and schema management
//! - Profile upserts keyed by Identity
//! - Lookups used for cache hits, listing deduplication and crawl seeding

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteProfileStore;
pub use traits::{ProfileStore, StorageError, StorageResult};

use crate::ScoutError;
use std::path::Path;

/// Initializes or opens a profile store database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> Result<SqliteProfileStore, ScoutError> {
    SqliteProfileStore::new(path)
}
