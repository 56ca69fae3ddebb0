use thiserror::Error;

use maqra_shared::{Subject, VideoId};

/// Errors produced by the storage adapters (key/value and blob stores).
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the key/value backend.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (blob files, directory creation).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of a stored value failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value exceeded the key/value store's per-value capacity.
    #[error("Value for key '{key}' is {size} bytes, over the {limit} byte limit")]
    CapacityExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Errors surfaced by the catalog repository to the presentation layer.
///
/// Every failure is an explicit value; nothing in this layer panics or
/// retries on its own.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required field was empty after trimming.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A mutating call was attempted without an elevated session.
    #[error("Admin session required")]
    Unauthorized,

    /// No record with this id exists under this subject.
    #[error("Video {id} not found in subject '{subject}'")]
    NotFound { id: VideoId, subject: Subject },

    /// A read from the key/value or blob store failed.
    #[error("Storage read failed: {0}")]
    StorageRead(#[source] StoreError),

    /// A write to the key/value or blob store failed.
    #[error("Storage write failed: {0}")]
    StorageWrite(#[source] StoreError),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
