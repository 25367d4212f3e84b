//! CRUD operations over the persisted environment collection.

use crate::core::normalize;
use crate::errors::{Error, Result};
use crate::models::Environment;
use crate::store::backend::{FileBackend, MemoryBackend, StorageBackend};
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Result of an [`EnvironmentStore::update`] call.
///
/// An unknown id is an explicit outcome rather than a silent no-op, so
/// callers can tell the user nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record was replaced; carries the normalized copy as stored
    Updated(Environment),
    /// No record with the given id exists; storage untouched
    NotFound,
}

/// Result of an [`EnvironmentStore::delete`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed; carries it for confirmation messages
    Deleted(Environment),
    /// No record with the given id exists; storage untouched
    NotFound,
}

/// Store for the whole environment collection, persisted as one JSON array
/// blob behind a [`StorageBackend`].
///
/// Every record leaving the store has passed through the normalizer, so the
/// canonical-shape invariants hold for callers regardless of what is on
/// disk. Mutations are read-modify-write over the full blob; the last
/// writer wins.
#[derive(Debug)]
pub struct EnvironmentStore {
    backend: Box<dyn StorageBackend>,
}

impl EnvironmentStore {
    /// Creates a store over an arbitrary backend.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Creates a store persisting to a JSON file at `path`.
    #[must_use]
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(Box::new(FileBackend::new(path)))
    }

    /// Creates a store over an in-memory backend, for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Loads the full collection, normalizing every record.
    ///
    /// A missing blob is an empty collection. A blob that is not valid JSON
    /// or not a JSON array is treated as no data: the diagnostic is logged
    /// and an empty collection is returned, so corrupt state never takes
    /// the caller down. Backend read failures do propagate.
    #[instrument(skip(self))]
    pub fn load_all(&self) -> Result<Vec<Environment>> {
        let Some(payload) = self.backend.read()? else {
            return Ok(Vec::new());
        };

        let parsed: Value = match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(e) => {
                warn!("Persisted data is not valid JSON, resetting to empty: {e}");
                return Ok(Vec::new());
            }
        };

        let Some(items) = parsed.as_array() else {
            warn!("Persisted data is not a JSON array, resetting to empty");
            return Ok(Vec::new());
        };

        let environments: Vec<Environment> = items.iter().map(normalize).collect();
        debug!("Loaded {} environments", environments.len());
        Ok(environments)
    }

    /// Serializes the full collection pretty-printed and replaces the
    /// persisted blob.
    ///
    /// Write failures propagate so the caller can warn the user that the
    /// change was not persisted.
    #[instrument(skip(self, environments))]
    pub fn save_all(&self, environments: &[Environment]) -> Result<()> {
        let payload = serde_json::to_string_pretty(environments)?;
        self.backend.write(&payload)?;
        debug!("Saved {} environments", environments.len());
        Ok(())
    }

    /// Appends a normalized copy of `environment` to the collection and
    /// persists it.
    ///
    /// A record whose id is already present is rejected with
    /// [`Error::DuplicateId`], leaving the collection untouched. Returns
    /// the record as stored.
    #[instrument(skip(self, environment))]
    pub fn add(&self, environment: &Environment) -> Result<Environment> {
        let normalized = normalize(&serde_json::to_value(environment)?);

        let mut environments = self.load_all()?;
        if environments.iter().any(|env| env.id == normalized.id) {
            return Err(Error::DuplicateId {
                id: normalized.id.clone(),
            });
        }

        environments.push(normalized.clone());
        self.save_all(&environments)?;
        info!("Added environment '{}' (id: {})", normalized.name, normalized.id);
        Ok(normalized)
    }

    /// Replaces the stored record with the same id by a normalized copy of
    /// `environment`, refreshing `updated_at` and keeping the stored
    /// `created_at`.
    #[instrument(skip(self, environment))]
    pub fn update(&self, environment: &Environment) -> Result<UpdateOutcome> {
        let mut environments = self.load_all()?;

        let Some(index) = environments.iter().position(|env| env.id == environment.id) else {
            info!("No environment with id '{}' to update", environment.id);
            return Ok(UpdateOutcome::NotFound);
        };

        let mut normalized = normalize(&serde_json::to_value(environment)?);
        normalized.created_at = environments[index].created_at;
        normalized.updated_at = Utc::now();

        environments[index] = normalized.clone();
        self.save_all(&environments)?;
        info!("Updated environment '{}' (id: {})", normalized.name, normalized.id);
        Ok(UpdateOutcome::Updated(normalized))
    }

    /// Removes the record with the given id and persists the remainder.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let mut environments = self.load_all()?;

        let Some(index) = environments.iter().position(|env| env.id == id) else {
            info!("No environment with id '{id}' to delete");
            return Ok(DeleteOutcome::NotFound);
        };

        let removed = environments.remove(index);
        self.save_all(&environments)?;
        info!("Deleted environment '{}' (id: {})", removed.name, removed.id);
        Ok(DeleteOutcome::Deleted(removed))
    }
}
