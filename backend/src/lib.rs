//! # Cash Tracker Backend
//!
//! Daily cash reconciliation service. Cashiers record denomination counts
//! and adjustments for each business day; managers view the aggregated cash
//! breakdown over a date range.
//!
//! - `domain`: denomination rules, form and report logic, sessions
//! - `storage`: SQLite and monthly CSV backends behind [`storage::EntryStorage`]
//! - `io`: the REST API served by axum
//! - `config`: YAML configuration

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use config::{AppConfig, AuthConfig, StorageConfig};
use domain::{AuthService, EntryService, ReportService};
use storage::{Connection, CsvConnection, DbConnection, EntryStorage};

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub entry_service: EntryService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(storage: Arc<dyn EntryStorage>, auth: AuthConfig) -> Self {
        Self {
            auth_service: AuthService::new(auth),
            entry_service: EntryService::new(storage.clone()),
            report_service: ReportService::new(storage),
        }
    }
}

/// Open the configured storage backend
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn EntryStorage>> {
    let storage: Arc<dyn EntryStorage> = match config {
        StorageConfig::Sqlite { database_url } => {
            info!("Using SQLite storage at {}", database_url);
            let connection = DbConnection::new(database_url)
                .await
                .with_context(|| format!("Failed to open database {}", database_url))?;
            Arc::new(connection.create_entry_repository())
        }
        StorageConfig::Csv { data_directory } => {
            info!("Using CSV storage in {}", data_directory.display());
            let connection = CsvConnection::new(data_directory).with_context(|| {
                format!("Failed to open data directory {}", data_directory.display())
            })?;
            Arc::new(connection.create_entry_repository())
        }
    };

    Ok(storage)
}

/// Build the application state from configuration
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let storage = open_storage(&config.storage).await?;
    Ok(AppState::new(storage, config.auth_config()))
}

/// Routes under `/api`, CORS for the configured origin and an optional static frontend
pub fn create_router(state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/auth/login", post(io::rest::login))
        .route("/auth/logout", post(io::rest::logout))
        .route("/auth/session", get(io::rest::current_session))
        .route(
            "/entries/:date",
            get(io::rest::get_daily_entry).put(io::rest::save_daily_entry),
        )
        .route("/reports/cash", get(io::rest::get_cash_report));

    let mut app = Router::new().nest("/api", api_routes);
    if let Some(directory) = &config.static_directory {
        info!("Serving frontend from {}", directory.display());
        app = app.fallback_service(ServeDir::new(directory));
    }

    Ok(app.layer(cors).with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_origin_is_an_error() {
        let config = AppConfig {
            allowed_origin: "bad\norigin".to_string(),
            ..AppConfig::default()
        };
        let state = AppState::new(
            Arc::new(storage::csv::test_utils::TestEnvironment::new().unwrap().entry_repository()),
            AuthConfig::default(),
        );

        assert!(create_router(state, &config).is_err());
    }

    #[tokio::test]
    async fn test_open_csv_storage_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_directory = dir.path().join("cash");

        let storage = open_storage(&StorageConfig::Csv {
            data_directory: data_directory.clone(),
        })
        .await
        .unwrap();

        assert!(data_directory.is_dir());
        assert!(storage.load_all().await.unwrap().is_empty());
    }
}
