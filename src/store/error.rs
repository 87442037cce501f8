//! Error types for the key-value store.

use thiserror::Error;

/// Error type for store operations.
///
/// Unlike the browser-storage model this store is derived from, failures are
/// surfaced to callers instead of being degraded to `null`/`false`, so a full
/// disk or a corrupt record never turns into a silent no-op.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record could not be serialized for storage.
    #[error("Failed to serialize record for key {key}: {source}")]
    Serialize {
        /// Key the record was being written under.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A stored record could not be parsed back from JSON.
    #[error("Corrupt record at key {key}: {source}")]
    Corrupt {
        /// Key the record was read from.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Storage operation failed for a non-database reason.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
