//! Command-line interface, organized by category.
//!
//! This is the rendering layer: it calls into the store in response to the
//! chosen subcommand and surfaces outcomes and errors as terminal messages.

/// Environment CRUD commands (list, show, add, update, delete)
pub mod environment;

/// Export and import commands
pub mod transfer;

use crate::config::Settings;
use crate::errors::Result;
use crate::store::EnvironmentStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dashboard for deployment environment metadata, persisted locally as a
/// single JSON file.
#[derive(Debug, Parser)]
#[command(name = "envdash", version, about)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all environments with their status
    List,
    /// Show the full details of one environment
    Show {
        /// Id of the environment to show
        id: String,
    },
    /// Create a new environment
    Add(environment::AddArgs),
    /// Update fields of an existing environment
    Update(environment::UpdateArgs),
    /// Delete an environment
    Delete {
        /// Id of the environment to delete
        id: String,
    },
    /// Export all environments to a JSON file
    Export {
        /// Output path (defaults to the configured export filename)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace all environments with the contents of a JSON file
    Import {
        /// File containing a JSON array of environments
        file: PathBuf,
    },
}

/// Runs the chosen subcommand against the store.
pub async fn dispatch(
    command: Command,
    store: &EnvironmentStore,
    settings: &Settings,
) -> Result<()> {
    match command {
        Command::List => environment::run_list(store),
        Command::Show { id } => environment::run_show(store, &id),
        Command::Add(args) => environment::run_add(store, args),
        Command::Update(args) => environment::run_update(store, args),
        Command::Delete { id } => environment::run_delete(store, &id),
        Command::Export { output } => transfer::run_export(store, settings, output),
        Command::Import { file } => transfer::run_import(store, &file).await,
    }
}
