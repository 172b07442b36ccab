//! API configuration
//!
//! Read from the environment with the `config` crate. Every setting except
//! the database URL has a default:
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required |
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `8000` |
//! | `API_LOG_LEVEL` | `info` |
//! | `API_LOG_FORMAT` | `text` (`json` for one JSON object per line) |
//! | `API_CORS_ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `API_DB_MAX_CONNECTIONS` | `10` |

use std::collections::HashMap;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Default filter directive, `RUST_LOG` takes precedence
    pub log_level: String,
    pub log_format: LogFormat,
    /// Comma separated list of origins allowed by CORS
    pub cors_allowed_origins: String,
    pub db_max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: String::new(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "http://localhost:3000".to_string(),
            db_max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Loads configuration from an explicit set of variables
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or blank, or a value cannot be
    /// parsed.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let database_url = vars.get("DATABASE_URL").cloned();

        let config: ApiConfig = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "text")?
            .set_default("cors_allowed_origins", defaults.cors_allowed_origins)?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .add_source(Environment::with_prefix("API").source(Some(vars)))
            .set_override_option("database_url", database_url)?
            .build()?
            .try_deserialize()?;

        if config.database_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "DATABASE_URL environment variable is not set".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allowed CORS origins, blank entries dropped
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = ApiConfig::from_vars(vars(&[("DATABASE_URL", "postgres://localhost/scheduling")])).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.allowed_origins(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = ApiConfig::from_vars(vars(&[("API_PORT", "9000")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        assert!(ApiConfig::from_vars(vars(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = ApiConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/scheduling"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9000"),
            ("API_LOG_FORMAT", "json"),
            ("API_CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("API_DB_MAX_CONNECTIONS", "25"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.db_max_connections, 25);
        assert_eq!(config.allowed_origins(), vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ApiConfig::from_vars(vars(&[("DATABASE_URL", "postgres://db/x"), ("API_PORT", "eighty")]));
        assert!(result.is_err());
    }
}
