use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cash_tracker::config::{AppConfig, StorageConfig};
use cash_tracker::storage::{migrate, Connection, CsvConnection};
use cash_tracker::{create_router, initialize_backend, open_storage};

const USAGE: &str = "usage: cash-tracker [import-csv <data-directory>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load_from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => serve(config).await,
        [command, directory] if command == "import-csv" => {
            import_csv(&config, PathBuf::from(directory)).await
        }
        _ => bail!(USAGE),
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = initialize_backend(&config).await?;
    let app = create_router(state, &config)?;

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Copy monthly CSV files into the configured database
async fn import_csv(config: &AppConfig, directory: PathBuf) -> anyhow::Result<()> {
    if !matches!(config.storage, StorageConfig::Sqlite { .. }) {
        bail!("import-csv needs the sqlite storage backend to be configured");
    }
    if !directory.is_dir() {
        bail!("{} is not a directory", directory.display());
    }

    let source = CsvConnection::new(&directory)?.create_entry_repository();
    let target = open_storage(&config.storage).await?;

    let copied = migrate::copy_entries(&source, target.as_ref()).await?;
    info!("Imported {} cash entries from {}", copied, directory.display());

    Ok(())
}
