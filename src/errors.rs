//! Unified error types and result handling.

use thiserror::Error;

/// All error conditions surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// The storage backend failed to read or write the persisted blob
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// An `add` was attempted with an id that is already present
    #[error("An environment with id '{id}' already exists")]
    DuplicateId {
        /// The conflicting environment id
        id: String,
    },

    /// A file import failed; the persisted collection was left untouched
    #[error("{message}")]
    Import {
        /// Message suitable for showing directly to the user
        message: String,
    },

    /// Serialization of the collection failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying filesystem failure outside the storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
