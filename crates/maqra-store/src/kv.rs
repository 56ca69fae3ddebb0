//! Small-value key/value storage.
//!
//! The [`KvStore`] owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.  Values are JSON
//! documents; a per-value capacity limit models the quota of the storage
//! the snapshot format was designed for, so oversized writes fail with
//! [`StoreError::CapacityExceeded`] instead of silently truncating.

use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use maqra_shared::constants::MAX_KV_VALUE_BYTES;

use crate::error::{Result, StoreError};
use crate::migrations;

/// JSON key/value store backed by a single SQLite table.
pub struct KvStore {
    conn: Connection,
    max_value_bytes: usize,
}

impl KvStore {
    /// Open (or create) the default application store.
    ///
    /// The database file is placed in the platform-appropriate data
    /// directory:
    /// - Linux:   `~/.local/share/maqra/catalog.db`
    /// - macOS:   `~/Library/Application Support/com.maqra.maqra/catalog.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\maqra\maqra\data\catalog.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "maqra", "maqra").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("catalog.db");

        tracing::info!(path = %db_path.display(), "opening kv store");

        Self::open_at(&db_path)
    }

    /// Open (or create) a store at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open_at_with_limit(path, MAX_KV_VALUE_BYTES)
    }

    /// Open a store with a non-default per-value capacity limit.
    pub fn open_at_with_limit(path: &Path, max_value_bytes: usize) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn,
            max_value_bytes,
        })
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// A missing key is `Ok(None)`, never an error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it under `key`, replacing any
    /// previous value.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;

        if json.len() > self.max_value_bytes {
            return Err(StoreError::CapacityExceeded {
                key: key.to_string(),
                size: json.len(),
                limit: self.max_value_bytes,
            });
        }

        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, json, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!(key, bytes = json.len(), "kv value written");
        Ok(())
    }

    /// Delete the value under `key`.  Returns `true` if a row was removed.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// Whether a value exists under `key`.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Return the filesystem path of the open store (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open_at(&dir.path().join("kv.db")).expect("should open");
        assert!(store.path().is_some());

        store.put_json("greeting", &vec!["salam", "hello"]).unwrap();
        let back: Option<Vec<String>> = store.get_json("greeting").unwrap();
        assert_eq!(back, Some(vec!["salam".to_string(), "hello".to_string()]));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open_at(&dir.path().join("kv.db")).unwrap();

        let got: Option<Vec<i64>> = store.get_json("nope").unwrap();
        assert!(got.is_none());
        assert!(!store.contains("nope").unwrap());
    }

    #[test]
    fn overwrite_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open_at(&dir.path().join("kv.db")).unwrap();

        store.put_json("k", &1i64).unwrap();
        store.put_json("k", &2i64).unwrap();
        assert_eq!(store.get_json::<i64>("k").unwrap(), Some(2));

        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn oversized_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open_at_with_limit(&dir.path().join("kv.db"), 16).unwrap();

        let big = "x".repeat(64);
        let err = store.put_json("big", &big).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { .. }));

        // Nothing was stored.
        assert!(!store.contains("big").unwrap());
    }
}
