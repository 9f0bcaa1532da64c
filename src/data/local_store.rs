//! Local key-value store, the terminal counterpart of browser local storage

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use super::migrations;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Lock poisoned")]
    LockPoisoned,
}

/// String-keyed, string-valued slots in the `local_storage` table of a SQLite file
#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl LocalStore {
    /// Open (or create) the store file and bring its schema up to date
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut conn = Connection::open(&path)?;
        migrations::run_migrations(&mut conn)?;
        tracing::debug!(path = %path.display(), "Opened local store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Open the store at `~/.valentine/store.db`
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(crate::util::store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set a value, replacing whatever the slot held
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_nested_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.db");
        let store = LocalStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, store) = setup_store();

        store.set_item("greeting", "hello").unwrap();
        assert_eq!(store.get_item("greeting").unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = setup_store();

        store.set_item("slot", "one").unwrap();
        store.set_item("slot", "two").unwrap();
        assert_eq!(store.get_item("slot").unwrap(), Some("two".to_string()));
    }

    #[test]
    fn test_reopen_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        LocalStore::open(&path).unwrap().set_item("slot", "kept").unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("slot").unwrap().as_deref(), Some("kept"));
    }
}
