//! `SQLite`-backed key-value store with JSON values.
//!
//! The store mirrors a browser `localStorage` profile: a single flat string
//! key space where every value is a JSON document. Entity layout is defined
//! in [`keys`]; the higher layers (user directory, habit repository, social
//! graph) treat this as an ad-hoc document store and build their queries out
//! of [`KvStore::get`], [`KvStore::set`] and the prefix scan.
//!
//! Per-key writes are atomic. Multi-key updates go through
//! [`KvStore::set_many`], which wraps all writes in one `SQLite` transaction
//! so a dual-record update (both sides of a follow edge) can never be
//! half-applied.

// SQLite operations need to hold the lock for the duration of the operation.
// Dropping the guard earlier would require restructuring all methods.
#![allow(clippy::significant_drop_tightening)]

pub mod keys;

mod error;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub use error::{Result, StoreError};

/// Persistent string-keyed JSON store.
///
/// Thread-safe wrapper around a `SQLite` connection holding a single
/// `kv(key, value)` table.
pub struct KvStore {
    conn: Mutex<Connection>,
}

impl KvStore {
    /// Opens (or creates) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Creates an in-memory store.
    ///
    /// State lives only as long as the value; used for tests and ephemeral
    /// sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initializes the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("Failed to acquire store lock: {e}")))
    }

    /// Reads and deserializes the record stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored text is not valid JSON
    /// for `T`, or a database error if the read fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            None => Ok(None),
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(value)),
                Err(source) => {
                    warn!(key, error = %source, "corrupt record in store");
                    Err(StoreError::Corrupt {
                        key: key.to_string(),
                        source,
                    })
                }
            },
        }
    }

    /// Serializes `value` as JSON and upserts it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let conn = self.lock()?;
        conn.execute(
            r"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, text],
        )?;
        Ok(())
    }

    /// Upserts several records in a single transaction.
    ///
    /// Either every entry is persisted or none is; used where two records
    /// must stay mutually consistent (the two sides of a follow edge).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization of any entry or the database write
    /// fails. Serialization happens before the transaction opens, so a bad
    /// entry leaves the store untouched.
    pub fn set_many<T: Serialize>(&self, entries: &[(String, &T)]) -> Result<()> {
        let mut serialized = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let text = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
                key: key.clone(),
                source,
            })?;
            serialized.push((key.as_str(), text));
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for (key, text) in &serialized {
            tx.execute(
                r"
                INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                ",
                params![key, text],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Removes the record stored under `key`.
    ///
    /// Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Returns whether a record exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns all keys starting with `prefix`, sorted.
    ///
    /// This is the scan primitive the entity layers build their "all
    /// records" queries on. O(n) in the number of matching keys, which is
    /// acceptable for single-profile data sets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r"
            SELECT key FROM kv
            WHERE key LIKE ?1 ESCAPE '\'
            ORDER BY key
            ",
        )?;

        let pattern = format!("{}%", escape_like(prefix));
        let keys = stmt
            .query_map(params![pattern], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Escapes `LIKE` wildcards so a prefix such as `user_` matches literally
/// rather than treating `_` as a single-character wildcard.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
