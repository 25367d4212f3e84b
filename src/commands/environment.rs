//! Environment CRUD commands: list, show, add, update, delete.

use crate::errors::Result;
use crate::models::{Environment, EnvironmentLogin, EnvironmentStatus};
use crate::store::{DeleteOutcome, EnvironmentStore, UpdateOutcome};
use clap::Args;

/// Arguments for creating a new environment.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name of the environment
    #[arg(long)]
    pub name: String,

    /// Operational status (active, inactive, maintenance)
    #[arg(long, default_value = "active")]
    pub status: EnvironmentStatus,

    /// Login entry as LABEL=URL; repeat for multiple logins
    #[arg(long = "login", value_name = "LABEL=URL", value_parser = parse_login)]
    pub logins: Vec<EnvironmentLogin>,

    /// Couchbase cluster URL
    #[arg(long)]
    pub couchbase_url: Option<String>,

    /// Couchbase account id
    #[arg(long)]
    pub couchbase_id: Option<String>,

    /// Couchbase account password
    #[arg(long)]
    pub couchbase_password: Option<String>,

    /// Jenkins pipeline URL
    #[arg(long)]
    pub jenkins_pipeline_url: Option<String>,

    /// Path to the Helm chart
    #[arg(long)]
    pub helm_chart_path: Option<String>,

    /// Helm upgrade command
    #[arg(long)]
    pub helm_upgrade_command: Option<String>,
}

/// Arguments for updating an existing environment. Only the supplied flags
/// change; everything else keeps its stored value.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Id of the environment to update
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New status (active, inactive, maintenance)
    #[arg(long)]
    pub status: Option<EnvironmentStatus>,

    /// Replacement login entries as LABEL=URL; repeat for multiple
    #[arg(long = "login", value_name = "LABEL=URL", value_parser = parse_login)]
    pub logins: Vec<EnvironmentLogin>,

    /// Couchbase cluster URL
    #[arg(long)]
    pub couchbase_url: Option<String>,

    /// Couchbase account id
    #[arg(long)]
    pub couchbase_id: Option<String>,

    /// Couchbase account password
    #[arg(long)]
    pub couchbase_password: Option<String>,

    /// Jenkins pipeline URL
    #[arg(long)]
    pub jenkins_pipeline_url: Option<String>,

    /// Path to the Helm chart
    #[arg(long)]
    pub helm_chart_path: Option<String>,

    /// Helm upgrade command
    #[arg(long)]
    pub helm_upgrade_command: Option<String>,
}

/// Parses a `LABEL=URL` pair into a login entry with empty credentials.
fn parse_login(value: &str) -> std::result::Result<EnvironmentLogin, String> {
    let (label, url) = value
        .split_once('=')
        .ok_or_else(|| format!("invalid login '{value}' (expected LABEL=URL)"))?;
    Ok(EnvironmentLogin {
        label: label.to_string(),
        url: url.to_string(),
        id: String::new(),
        password: String::new(),
    })
}

/// Prints a one-line-per-environment table plus the active/total summary.
pub fn run_list(store: &EnvironmentStore) -> Result<()> {
    let environments = store.load_all()?;

    if environments.is_empty() {
        println!("No environments found.");
        println!("Get started by adding one (`envdash add --name ...`) or importing a file.");
        return Ok(());
    }

    for env in &environments {
        println!(
            "{:<36}  {:<24}  {:<12}  {} login(s)",
            env.id,
            env.name,
            env.status.display_name(),
            env.environment_login.len()
        );
    }

    let active = environments
        .iter()
        .filter(|env| env.status == EnvironmentStatus::Active)
        .count();
    println!("{active} active / {} total", environments.len());
    Ok(())
}

/// Prints the full details of one environment.
pub fn run_show(store: &EnvironmentStore, id: &str) -> Result<()> {
    let environments = store.load_all()?;
    let Some(env) = environments.iter().find(|env| env.id == id) else {
        println!("No environment with id '{id}'.");
        return Ok(());
    };

    println!("{} ({})", env.name, env.status.display_name());
    println!("  id: {}", env.id);
    println!("  logins:");
    for login in &env.environment_login {
        println!(
            "    {:<16} url={} id={} password={}",
            login.label, login.url, login.id, login.password
        );
    }
    println!(
        "  couchbase: url={} id={} password={}",
        env.couchbase.url, env.couchbase.id, env.couchbase.password
    );
    println!("  jenkins: pipeline={}", env.jenkins.pipeline_url);
    println!("  helm chart path: {}", env.helm_chart_path);
    println!("  helm upgrade command: {}", env.helm_upgrade_command);
    println!("  created: {}", env.created_at.to_rfc3339());
    println!("  updated: {}", env.updated_at.to_rfc3339());
    Ok(())
}

/// Creates a new environment from the flags and persists it.
pub fn run_add(store: &EnvironmentStore, args: AddArgs) -> Result<()> {
    let mut environment = Environment::new(args.name);
    environment.status = args.status;
    if !args.logins.is_empty() {
        environment.environment_login = args.logins;
    }
    if let Some(url) = args.couchbase_url {
        environment.couchbase.url = url;
    }
    if let Some(id) = args.couchbase_id {
        environment.couchbase.id = id;
    }
    if let Some(password) = args.couchbase_password {
        environment.couchbase.password = password;
    }
    if let Some(url) = args.jenkins_pipeline_url {
        environment.jenkins.pipeline_url = url;
    }
    if let Some(path) = args.helm_chart_path {
        environment.helm_chart_path = path;
    }
    if let Some(command) = args.helm_upgrade_command {
        environment.helm_upgrade_command = command;
    }

    let added = store.add(&environment)?;
    println!(
        "Environment created: '{}' has been successfully created (id: {}).",
        added.name, added.id
    );
    Ok(())
}

/// Applies the supplied flags to the stored record and persists it.
pub fn run_update(store: &EnvironmentStore, args: UpdateArgs) -> Result<()> {
    let environments = store.load_all()?;
    let Some(stored) = environments.iter().find(|env| env.id == args.id) else {
        println!("No environment with id '{}'. Nothing was updated.", args.id);
        return Ok(());
    };

    let mut changed = stored.clone();
    if let Some(name) = args.name {
        changed.name = name;
    }
    if let Some(status) = args.status {
        changed.status = status;
    }
    if !args.logins.is_empty() {
        changed.environment_login = args.logins;
    }
    if let Some(url) = args.couchbase_url {
        changed.couchbase.url = url;
    }
    if let Some(id) = args.couchbase_id {
        changed.couchbase.id = id;
    }
    if let Some(password) = args.couchbase_password {
        changed.couchbase.password = password;
    }
    if let Some(url) = args.jenkins_pipeline_url {
        changed.jenkins.pipeline_url = url;
    }
    if let Some(path) = args.helm_chart_path {
        changed.helm_chart_path = path;
    }
    if let Some(command) = args.helm_upgrade_command {
        changed.helm_upgrade_command = command;
    }

    match store.update(&changed)? {
        UpdateOutcome::Updated(updated) => {
            println!(
                "Environment updated: '{}' has been successfully updated.",
                updated.name
            );
        }
        UpdateOutcome::NotFound => {
            println!("No environment with id '{}'. Nothing was updated.", args.id);
        }
    }
    Ok(())
}

/// Deletes the environment with the given id.
pub fn run_delete(store: &EnvironmentStore, id: &str) -> Result<()> {
    match store.delete(id)? {
        DeleteOutcome::Deleted(removed) => {
            println!(
                "Environment deleted: '{}' has been successfully deleted.",
                removed.name
            );
        }
        DeleteOutcome::NotFound => {
            println!("No environment with id '{id}'. Nothing was deleted.");
        }
    }
    Ok(())
}
