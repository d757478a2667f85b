//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Where customers and credits are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Persistence backend
    pub storage: StorageBackend,

    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    pub log_format: LogFormat,
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
        let storage: StorageBackend = lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let log_format = lookup("LOG_FORMAT")
            .unwrap_or_else(|| "text".to_string())
            .parse()?;

        Ok(Self {
            storage,
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            log_format,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/credit")])).unwrap();

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.is_production());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnv("DATABASE_URL"))));
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = Config::from_lookup(lookup(&[("STORAGE_BACKEND", "memory")])).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "not-a-port"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue("PORT"))));
    }

    #[test]
    fn test_json_logs_and_production() {
        let config = Config::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }
}
