//! Application configuration loaded from a YAML file.
//!
//! ```yaml
//! bind_address: 127.0.0.1:3000
//! allowed_origin: http://localhost:8080
//! storage:
//!   backend: sqlite
//!   database_url: sqlite:cash.db
//! users:
//!   - username: alice
//!     password: secret
//!     role: cashier
//!   - username: boss
//!     password: secret
//!     role: manager
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::Role;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::storage::sqlite::connection::DEFAULT_DATABASE_URL;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "CASH_TRACKER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "cash-tracker.yaml";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DATA_DIRECTORY_NAME: &str = "cash-tracker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    /// Origin allowed by CORS, usually the frontend dev server
    pub allowed_origin: String,
    /// Directory with a built frontend to serve for non-API paths
    pub static_directory: Option<PathBuf>,
    pub storage: StorageConfig,
    pub users: Vec<UserCredential>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            static_directory: None,
            storage: StorageConfig::default(),
            users: Vec::new(),
        }
    }
}

/// Which backend persists the daily entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    Sqlite {
        #[serde(default = "default_database_url")]
        database_url: String,
    },
    Csv {
        #[serde(default = "default_data_directory")]
        data_directory: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// `<platform data dir>/cash-tracker`, falling back to the working directory
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIRECTORY_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIRECTORY_NAME))
}

/// One entry of the static credential list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Credentials handed to the auth service at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthConfig {
    pub users: Vec<UserCredential>,
}

impl AppConfig {
    /// Parse a configuration document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml).context("Invalid configuration")?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Configuration file {} not found, using defaults (no users can log in)",
                path.display()
            );
            return Ok(Self::default());
        }

        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

        info!(
            "Loaded configuration from {} ({} users)",
            path.display(),
            config.users.len()
        );
        Ok(config)
    }

    /// Load from the path in `CASH_TRACKER_CONFIG`, or `cash-tracker.yaml`
    pub fn load_from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            users: self.users.clone(),
        }
    }
}
