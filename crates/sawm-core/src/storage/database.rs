//! SQLite-backed storage.
//!
//! Provides persistent storage for:
//! - The application state snapshot (under [`APP_STATE_KEY`])
//! - A key-value table for front-end state such as the counter session
//!
//! Every row carries a revision. Versioned writes use an upsert that only
//! replaces a row when the incoming revision is not older than the stored
//! one, so writes can never be applied out of order.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{data_dir, decode_state, encode_state, PersistentStore, StoredState};
use crate::error::{CoreError, PersistenceError};
use crate::state::AppState;

pub const APP_STATE_KEY: &str = "app_state";

/// SQLite database in the data directory.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/sawm.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("sawm.db");
        Ok(Self::open_at(path)?)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key      TEXT PRIMARY KEY,
                value    TEXT NOT NULL,
                revision INTEGER NOT NULL DEFAULT 0
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store, ignoring revisions.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, revision) VALUES (?1, ?2, 0)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Write `value` unless the stored row has a newer revision.
    ///
    /// Returns whether the row was written.
    pub fn kv_set_versioned(
        &self,
        key: &str,
        value: &str,
        revision: u64,
    ) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "INSERT INTO kv (key, value, revision) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, revision = excluded.revision
             WHERE excluded.revision >= kv.revision",
            params![key, value, revision as i64],
        )?;
        Ok(changed > 0)
    }

    /// Value and revision of a row.
    pub fn kv_get_versioned(&self, key: &str) -> Result<Option<(String, u64)>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT value, revision FROM kv WHERE key = ?1",
                params![key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?.max(0) as u64)),
            )
            .optional()
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl PersistentStore for SqliteStore {
    fn load(&self) -> Result<Option<StoredState>, PersistenceError> {
        let Some((raw, revision)) = self.kv_get_versioned(APP_STATE_KEY)? else {
            return Ok(None);
        };
        Ok(decode_state(&raw).map(|state| StoredState { state, revision }))
    }

    fn stored_revision(&self) -> Result<u64, PersistenceError> {
        Ok(self
            .kv_get_versioned(APP_STATE_KEY)?
            .map_or(0, |(_, revision)| revision))
    }

    fn save(&mut self, state: &AppState, revision: u64) -> Result<(), PersistenceError> {
        let raw = encode_state(state)?;
        if !self.kv_set_versioned(APP_STATE_KEY, &raw, revision)? {
            let stored = self.stored_revision()?;
            debug!(revision, stored, "refused stale state write");
            return Err(PersistenceError::StaleRevision {
                attempted: revision,
                stored,
            });
        }
        Ok(())
    }
}
