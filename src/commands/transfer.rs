//! Export and import commands.

use crate::config::Settings;
use crate::errors::Result;
use crate::store::{EnvironmentStore, export_environments};
use std::path::{Path, PathBuf};

/// Writes the current collection to a JSON file.
pub fn run_export(
    store: &EnvironmentStore,
    settings: &Settings,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(&settings.export_filename));
    let environments = store.load_all()?;

    export_environments(&environments, &path)?;
    println!(
        "Data downloaded: {} environment(s) written to '{}'.",
        environments.len(),
        path.display()
    );
    Ok(())
}

/// Replaces the collection with the contents of a JSON file.
pub async fn run_import(store: &EnvironmentStore, file: &Path) -> Result<()> {
    let imported = store.import_from_file(file).await?;
    println!(
        "Data uploaded: {} environment(s) loaded from '{}'.",
        imported.len(),
        file.display()
    );
    Ok(())
}
