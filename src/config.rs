//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Which repository backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            _ => Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository backend
    pub storage_backend: StorageBackend,

    /// Database connection URL (empty for the memory backend)
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Public base URL of the todo collection, used to build item urls
    pub base_url: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = lookup("STORAGE_BACKEND")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(StorageBackend::Postgres);

        let database_url = match (storage_backend, lookup("DATABASE_URL")) {
            (_, Some(url)) => url,
            (StorageBackend::Memory, None) => String::new(),
            (StorageBackend::Postgres, None) => return Err(ConfigError::MissingEnv("DATABASE_URL")),
        };

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let base_url = lookup("BASE_URL")
            .unwrap_or_else(|| format!("http://{}:{}/todos", host, port))
            .trim_end_matches('/')
            .to_string();

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            host,
            port,
            base_url,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
