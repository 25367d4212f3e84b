//! Persistence boundary for the environment collection.
//!
//! The whole collection lives in one pretty-printed JSON array blob behind a
//! [`StorageBackend`]. All mutations are synchronous read-modify-write over
//! that blob; the only asynchronous operation is file import.

pub mod backend;
pub mod environments;
pub mod transfer;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use environments::{DeleteOutcome, EnvironmentStore, UpdateOutcome};
pub use transfer::{DEFAULT_EXPORT_FILENAME, export_environments};
