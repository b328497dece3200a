//! SQLite-backed local storage.
//!
//! The remote backend owns quotes, favorites and collections; the only
//! state kept on-device is a key-value table holding the daily-engagement
//! markers (last reveal date, goal counters) and small app state.

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, KvStore};
use crate::error::{DatabaseError, Result};

/// SQLite database for local key/value state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/quotevault/quotevault.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("quotevault.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a value from the key-value store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(DatabaseError::from)?;
        Ok(value)
    }

    /// Set a value in the key-value store (insert or replace).
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// Delete a key from the key-value store. Missing keys are a no-op.
    pub fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}

impl KvStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.kv_get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.kv_set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.kv_delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set("last_scratch_date", "2024-03-15").unwrap();
        assert_eq!(
            db.kv_get("last_scratch_date").unwrap().as_deref(),
            Some("2024-03-15")
        );
    }

    #[test]
    fn kv_set_replaces_existing() {
        let db = Database::open_memory().unwrap();
        db.kv_set("daily_goal_2024-03-15", "3").unwrap();
        db.kv_set("daily_goal_2024-03-15", "4").unwrap();
        assert_eq!(
            db.kv_get("daily_goal_2024-03-15").unwrap().as_deref(),
            Some("4")
        );
    }

    #[test]
    fn kv_delete_is_idempotent() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "v").unwrap();
        db.kv_delete("k").unwrap();
        db.kv_delete("k").unwrap();
        assert_eq!(db.kv_get("k").unwrap(), None);
    }
}
