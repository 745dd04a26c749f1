//! Taskboard API server binary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use taskboard_api::{server::init_tracing, ApiServer};
use taskboard_config::ConfigManager;

/// Task management REST API
#[derive(Debug, Parser)]
#[command(name = "taskboard-api", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let manager = cli
        .config
        .map(ConfigManager::with_path)
        .unwrap_or_default();
    let config = manager
        .load_config()
        .with_context(|| format!("loading {}", manager.config_path().display()))?;

    init_tracing(&config.logging.level);

    let server = ApiServer::from_config(&config).await?;
    server.run().await?;
    Ok(())
}
