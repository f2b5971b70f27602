//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Squad-Scout database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per discovered player; `document` holds the full upstream profile
CREATE TABLE IF NOT EXISTS profiles (
    steam_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    win_rate REAL NOT NULL DEFAULT 0,
    total_matches INTEGER NOT NULL DEFAULT 0,
    rank_premier INTEGER,
    rank_faceit_elo INTEGER,
    has_ban INTEGER NOT NULL DEFAULT 0,
    ban_count INTEGER NOT NULL DEFAULT 0,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_profiles_has_ban ON profiles(has_ban);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        let result = initialize_schema(&conn);

        assert!(result.is_ok());
    }

    #[test]
    fn test_profiles_table_exists_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='profiles'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
