//! File export and import of the environment collection.
//!
//! Export writes the same pretty-printed array layout as the persisted
//! blob, so an exported file can be re-imported (or dropped into the data
//! path) as-is. Import replaces the whole collection; a failed import
//! leaves the persisted state untouched.

use crate::core::normalize;
use crate::errors::{Error, Result};
use crate::models::Environment;
use crate::store::environments::EnvironmentStore;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Filename offered when the caller does not pick one.
pub const DEFAULT_EXPORT_FILENAME: &str = "environment_dashboard_data.json";

/// Writes `environments` to `path` as a pretty-printed JSON array.
#[instrument(skip(environments))]
pub fn export_environments(environments: &[Environment], path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(environments)?;
    fs::write(path, payload)?;
    info!(
        "Exported {} environments to {}",
        environments.len(),
        path.display()
    );
    Ok(())
}

impl EnvironmentStore {
    /// Reads a JSON file, normalizes its records, and replaces the whole
    /// persisted collection with them.
    ///
    /// The file's top level must be a JSON array. An unreadable file,
    /// invalid JSON, or any other top-level shape fails with a descriptive
    /// [`Error::Import`] and the persisted collection is left unchanged.
    #[instrument(skip(self))]
    pub async fn import_from_file(&self, path: &Path) -> Result<Vec<Environment>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Import {
                message: format!("Failed to read file {}: {e}", path.display()),
            })?;

        let parsed: Value = serde_json::from_str(&content).map_err(|e| Error::Import {
            message: format!("Failed to parse JSON file: {e}"),
        })?;

        let Some(items) = parsed.as_array() else {
            return Err(Error::Import {
                message: "Invalid JSON format: Expected an array of environments.".to_string(),
            });
        };

        let environments: Vec<Environment> = items.iter().map(normalize).collect();
        self.save_all(&environments)?;
        info!(
            "Imported {} environments from {}",
            environments.len(),
            path.display()
        );
        Ok(environments)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_environment, scratch_file};
    use serde_json::json;

    #[tokio::test]
    async fn test_import_replaces_collection() -> Result<()> {
        let store = EnvironmentStore::in_memory();
        store.add(&sample_environment("Old"))?;

        let path = scratch_file("import_ok");
        let blob = json!([
            { "id": "e1", "name": "Prod", "environmentLogin": [] },
            { "id": "e2", "name": "Staging",
              "environmentLogin": { "url": "u", "id": "i", "password": "p" } }
        ]);
        fs::write(&path, blob.to_string()).unwrap();

        let imported = store.import_from_file(&path).await?;
        assert_eq!(imported.len(), 2);
        // Both login layouts arrive normalized.
        assert_eq!(imported[0].environment_login.len(), 1);
        assert_eq!(imported[1].environment_login[0].url, "u");

        // The old collection is gone, wholesale replacement.
        let loaded = store.load_all()?;
        assert_eq!(loaded, imported);

        fs::remove_file(path).unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn test_import_rejects_non_array_and_leaves_state() -> Result<()> {
        let store = EnvironmentStore::in_memory();
        let existing = store.add(&sample_environment("Prod"))?;

        let path = scratch_file("import_non_array");
        fs::write(&path, r#"{"not":"an array"}"#).unwrap();

        let result = store.import_from_file(&path).await;
        let Err(Error::Import { message }) = result else {
            panic!("expected Import error");
        };
        assert!(message.contains("Expected an array of environments"));

        // Persisted collection unchanged from before the attempt.
        assert_eq!(store.load_all()?, vec![existing]);

        fs::remove_file(path).unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_json() -> Result<()> {
        let store = EnvironmentStore::in_memory();

        let path = scratch_file("import_bad_json");
        fs::write(&path, "{ not json").unwrap();

        let result = store.import_from_file(&path).await;
        assert!(matches!(result, Err(Error::Import { .. })));
        assert!(store.load_all()?.is_empty());

        fs::remove_file(path).unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn test_import_rejects_missing_file() -> Result<()> {
        let store = EnvironmentStore::in_memory();

        let result = store
            .import_from_file(Path::new("/no/such/envdash/file.json"))
            .await;
        let Err(Error::Import { message }) = result else {
            panic!("expected Import error");
        };
        assert!(message.contains("Failed to read file"));
        Ok(())
    }

    #[test]
    fn test_export_writes_pretty_array() -> Result<()> {
        let environments = vec![sample_environment("Prod")];
        let path = scratch_file("export");

        export_environments(&environments, &path)?;

        let content = fs::read_to_string(&path)?;
        // Pretty-printed, one field per line.
        assert!(content.starts_with("[\n"));
        let parsed: Vec<Environment> =
            serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, environments);

        fs::remove_file(path).unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn test_export_then_import_round_trip() -> Result<()> {
        let store = EnvironmentStore::in_memory();
        let environments = vec![sample_environment("Prod"), sample_environment("Staging")];
        let path = scratch_file("export_import");

        export_environments(&environments, &path)?;

        let imported = store.import_from_file(&path).await?;
        assert_eq!(imported, environments);

        fs::remove_file(path).unwrap();
        Ok(())
    }
}
