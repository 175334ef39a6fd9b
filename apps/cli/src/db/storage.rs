//! SQLite-backed storage medium.

use chrono::Utc;
use drill_core::{StorageMedium, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, StoreError>;

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(Box::new(e))
}

/// Blobs stored as rows of a single key-value table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    /// Open in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Last write time of `key`, as stored.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)
    }
}

impl StorageMedium for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(backend)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::ProgressStore;

    #[test]
    fn read_missing_key() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.read("absent").unwrap(), None);
        assert_eq!(storage.updated_at("absent").unwrap(), None);
    }

    #[test]
    fn write_replaces_value() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.write("k", "one").unwrap();
        storage.write("k", "two").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("two"));
        assert!(storage.updated_at("k").unwrap().is_some());
    }

    #[test]
    fn remove_deletes_row() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn progress_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.db");

        let mut store = ProgressStore::load(SqliteStorage::open(&path).unwrap()).unwrap();
        store.record_answer("Greetings", true);
        store.record_answer("Greetings", false);
        store.flush().unwrap();
        drop(store);

        let store = ProgressStore::load(SqliteStorage::open(&path).unwrap()).unwrap();
        assert_eq!(store.get_stats("Greetings", 4).accuracy, 50.0);
    }

    #[test]
    fn reopen_keeps_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.db");
        SqliteStorage::open(&path).unwrap();
        let storage = SqliteStorage::open(&path).unwrap();
        let count: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
