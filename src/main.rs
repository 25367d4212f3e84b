use clap::Parser;
use dotenvy::dotenv;
use envdash::commands::{self, Cli};
use envdash::config;
use envdash::errors::Result;
use envdash::store::EnvironmentStore;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Parse the command line before touching any state
    let cli = Cli::parse();

    // 4. Load settings and resolve the data path (env override wins)
    let settings = config::load_default_settings()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;
    let data_path = settings.resolved_data_path();
    debug!("Using data path: {data_path}");

    // 5. Open the store and run the command
    let store = EnvironmentStore::open(data_path);
    commands::dispatch(cli.command, &store, &settings)
        .await
        .inspect_err(|e| error!("{e}"))
}
