//! Storage backends holding the single persisted blob.

use crate::errors::{Error, Result};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// One persistence slot holding the serialized environment collection.
///
/// Backends only move opaque strings; parsing and normalization happen in
/// the store on top.
pub trait StorageBackend: fmt::Debug + Send + Sync {
    /// Returns the persisted payload, or `None` when nothing has been
    /// written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the persisted payload. Callers must never observe a partial
    /// write.
    fn write(&self, payload: &str) -> Result<()>;
}

/// Blob persisted as a single JSON file on disk.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend persisting to `path`. The file and its parent
    /// directory are created lazily on first write.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Location of the persisted file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, treating as empty", self.path.display());
                Ok(None)
            }
            Err(e) => Err(Error::Storage {
                message: format!("Failed to read {}: {e}", self.path.display()),
            }),
        }
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::Storage {
                message: format!("Failed to create {}: {e}", parent.display()),
            })?;
        }

        // Write to a sibling file and rename it into place, so a reader can
        // never observe a half-written blob.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, payload).map_err(|e| Error::Storage {
            message: format!("Failed to write {}: {e}", tmp_path.display()),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::Storage {
            message: format!("Failed to replace {}: {e}", self.path.display()),
        })?;

        debug!(
            "Persisted {} bytes to {}",
            payload.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory blob for tests; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    payload: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        let guard = self.payload.lock().map_err(|_| Error::Storage {
            message: "Failed to acquire lock on in-memory payload".to_string(),
        })?;
        Ok(guard.clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        let mut guard = self.payload.lock().map_err(|_| Error::Storage {
            message: "Failed to acquire lock on in-memory payload".to_string(),
        })?;
        *guard = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::scratch_file;

    #[test]
    fn test_file_backend_missing_file_reads_as_none() {
        let backend = FileBackend::new(scratch_file("missing"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_write_then_read() {
        let path = scratch_file("round_trip");
        let backend = FileBackend::new(path.clone());

        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));

        backend.write("[1]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[1]"));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_file_backend_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("envdash_{}", uuid::Uuid::new_v4()));
        let backend = FileBackend::new(dir.join("nested").join("data.json"));

        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert!(backend.read().unwrap().is_none());

        backend.write("payload").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("payload"));
    }
}
