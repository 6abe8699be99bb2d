use anyhow::Context;
use clap::Parser;
use sideshelf_lib::bootstrap::{self, ShelfRuntime};
use sideshelf_lib::cli::{self, Cli};
use shelf_infra::fs::app_data_dir::app_data_dir;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => app_data_dir()?.join(CONFIG_FILE_NAME),
    };
    let config = bootstrap::load_config(&config_path)?;

    let data_dir = bootstrap::resolve_data_dir(&config)?;
    bootstrap::tracing::init_tracing_subscriber(Some(&data_dir.join(LOG_DIR_NAME)))
        .context("Failed to initialize tracing")?;
    tracing::debug!(config = %config_path.display(), "Configuration loaded");

    let runtime = ShelfRuntime::build(config).await?;
    cli::run(cli.command, &runtime).await
}
