//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `.env` file, if present, is applied by `main` before loading.

use partsdesk_core::StockPolicy;
use partsdesk_db::DbConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which `Store` backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    /// Nothing survives a restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port
    pub port: u16,

    pub store: StoreBackend,

    /// SQLite database file (ignored for the memory backend)
    pub db_path: PathBuf,

    pub db_max_connections: u32,

    /// What a sale does when it would take stock below zero
    pub stock_policy: StockPolicy,

    /// The single login, created on first start
    pub admin_user: String,
    pub admin_password: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = ServerConfig {
            port: var("PORT", "3000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            store: var("PARTSDESK_STORE", "sqlite")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARTSDESK_STORE".to_string()))?,

            db_path: PathBuf::from(var("PARTSDESK_DB_PATH", "./partsdesk.db")),

            db_max_connections: var("PARTSDESK_DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARTSDESK_DB_MAX_CONNECTIONS".to_string()))?,

            stock_policy: var("PARTSDESK_STOCK_POLICY", "permissive")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARTSDESK_STOCK_POLICY".to_string()))?,

            admin_user: var("PARTSDESK_ADMIN_USER", "admin"),

            admin_password: var("PARTSDESK_ADMIN_PASSWORD", "123456"),

            log_json: var("PARTSDESK_LOG_JSON", "false")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARTSDESK_LOG_JSON".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PARTSDESK_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.admin_user.trim().is_empty() {
            return Err(ConfigError::MissingRequired("PARTSDESK_ADMIN_USER".to_string()));
        }

        if config.admin_password.is_empty() {
            return Err(ConfigError::MissingRequired(
                "PARTSDESK_ADMIN_PASSWORD".to_string(),
            ));
        }

        Ok(config)
    }

    /// Pool settings for the SQLite backend.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
