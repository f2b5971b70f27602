//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProfileStore trait.

use crate::api::{Identity, Profile};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProfileStore, StorageError, StorageResult};
use crate::ScoutError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite profile store
///
/// The connection sits behind a mutex so one store can be shared by the
/// foreground API and the background gatherer.
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
}

impl SqliteProfileStore {
    /// Opens or creates the database at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteProfileStore)` - Successfully opened/created database
    /// * `Err(ScoutError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScoutError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database (for tests and dry runs)
    pub fn open_in_memory() -> Result<Self, ScoutError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Database("connection mutex poisoned".to_string()))
    }
}

impl ProfileStore for SqliteProfileStore {
    fn find(&self, id: &Identity) -> StorageResult<Option<Profile>> {
        let conn = self.conn()?;
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM profiles WHERE steam_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, id: &Identity) -> StorageResult<bool> {
        let conn = self.conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM profiles WHERE steam_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn save(&self, profile: &Profile) -> StorageResult<()> {
        let document = serde_json::to_string(profile)?;
        let now = Utc::now().to_rfc3339();
        let (premier, faceit) = profile
            .ranks
            .as_ref()
            .map(|r| (r.premier, r.faceit_elo))
            .unwrap_or((None, None));

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO profiles (steam_id, name, win_rate, total_matches, rank_premier,
                 rank_faceit_elo, has_ban, ban_count, document, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
             ON CONFLICT(steam_id) DO UPDATE SET
                 name = excluded.name,
                 win_rate = excluded.win_rate,
                 total_matches = excluded.total_matches,
                 rank_premier = excluded.rank_premier,
                 rank_faceit_elo = excluded.rank_faceit_elo,
                 has_ban = excluded.has_ban,
                 ban_count = excluded.ban_count,
                 document = excluded.document,
                 updated_at = excluded.updated_at",
            params![
                profile.steam_id.as_str(),
                profile.name,
                profile.win_rate,
                profile.total_matches,
                premier,
                faceit,
                profile.has_ban(),
                profile.bans.len() as i64,
                document,
                now,
            ],
        )?;
        Ok(())
    }

    fn any_identity(&self) -> StorageResult<Option<Identity>> {
        let conn = self.conn()?;
        let id: Option<String> = conn
            .query_row(
                "SELECT steam_id FROM profiles ORDER BY RANDOM() LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(Identity::from))
    }

    fn count_profiles(&self) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_banned(&self) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM profiles WHERE has_ban = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BanEntry, Ranks};

    fn banned_profile(id: &str) -> Profile {
        let mut profile = Profile::new(id, format!("player-{}", id)).with_teammates(["t1", "t2"]);
        profile.bans.push(BanEntry {
            platform: Some("steam".to_string()),
            banned_since: Some("2024-05-01".to_string()),
        });
        profile.ranks = Some(Ranks {
            premier: Some(15000),
            faceit_elo: None,
        });
        profile
    }

    #[test]
    fn test_create_in_memory() {
        let store = SqliteProfileStore::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_save_and_find_roundtrip() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        let profile = banned_profile("100");

        store.save(&profile).unwrap();

        let loaded = store.find(&Identity::from("100")).unwrap().unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.teammate_ids().count(), 2);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        assert!(store.find(&Identity::from("nope")).unwrap().is_none());
        assert!(!store.exists(&Identity::from("nope")).unwrap());
    }

    #[test]
    fn test_save_is_last_write_wins() {
        let store = SqliteProfileStore::open_in_memory().unwrap();

        store.save(&Profile::new("7", "first")).unwrap();
        store.save(&Profile::new("7", "second")).unwrap();

        assert_eq!(store.count_profiles().unwrap(), 1);
        let loaded = store.find(&Identity::from("7")).unwrap().unwrap();
        assert_eq!(loaded.name, "second");
    }

    #[test]
    fn test_any_identity() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        assert!(store.any_identity().unwrap().is_none());

        store.save(&Profile::new("a", "a")).unwrap();
        store.save(&Profile::new("b", "b")).unwrap();

        let picked = store.any_identity().unwrap().unwrap();
        assert!(picked.as_str() == "a" || picked.as_str() == "b");
    }

    #[test]
    fn test_counts() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        store.save(&banned_profile("1")).unwrap();
        store.save(&Profile::new("2", "clean")).unwrap();

        assert_eq!(store.count_profiles().unwrap(), 2);
        assert_eq!(store.count_banned().unwrap(), 1);
        assert!(store.exists(&Identity::from("2")).unwrap());
    }
}
