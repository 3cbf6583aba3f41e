//! Configuration types for the AI requestor service.
//!
//! Configuration is loaded from a single YAML file (`requestor.yaml` by
//! default). Every section is optional; missing sections fall back to
//! defaults suited to a stock Frappe site.
//!
//! # Sections
//!
//! - **database**: application database connection (MariaDB/MySQL)
//! - **server**: HTTP listener
//! - **ai_server**: upstream AI server the payloads are relayed to
//! - **catalog**: table prefix, excluded modules, system-field denylist
//! - **raw_query**: gate for the raw SQL endpoint

pub mod ai_server;
pub mod catalog;
pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use ai_server::AiServerConfig;
pub use catalog::{
    CatalogConfig, DEFAULT_EXCLUDED_MODULES, DEFAULT_SYSTEM_FIELDS, DEFAULT_TABLE_PREFIX,
};
pub use database::{ConnectionPoolConfig, DatabaseConfig};
pub use server::{RawQueryConfig, ServerConfig};

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RequestorConfig {
    /// Application database connection.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream AI server.
    #[serde(default)]
    pub ai_server: AiServerConfig,

    /// Catalog filtering rules.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Raw SQL endpoint gate.
    #[serde(default)]
    pub raw_query: RawQueryConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("AI server URL is not configured (set the {0} environment variable)")]
    MissingAiServerUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RequestorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.table_prefix.is_empty() {
            return Err(ConfigError::Config(
                "catalog.table_prefix must not be empty".to_string(),
            ));
        }
        if self.raw_query.enabled && self.raw_query.token().is_none() {
            return Err(ConfigError::Config(format!(
                "raw_query is enabled but {} is not set",
                self.raw_query.token_env
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = RequestorConfig::from_yaml("").unwrap();
        assert_eq!(config.server.listen_port, 8000);
        assert_eq!(config.catalog.table_prefix, "tab");
        assert!(!config.raw_query.enabled);
        assert_eq!(config.ai_server.base_url_env, "LOCAL_SERVER_URL");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
server:
  listen_port: 9100
ai_server:
  base_url: http://localhost:5000
  timeout_seconds: 30
database:
  database_url_env: null
  database: site1
"#;
        let config = RequestorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.server.listen_port, 9100);
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.ai_server.timeout_seconds, Some(30));
        assert_eq!(config.database.database, "site1");
        assert_eq!(config.database.port, 3306);
        assert!(config.database.database_url_env.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = RequestorConfig::load_or_default("/nonexistent/requestor.yaml").unwrap();
        assert_eq!(config.server.listen_port, 8000);
    }

    #[test]
    fn test_validate_rejects_raw_query_without_token() {
        let mut config = RequestorConfig::default();
        config.raw_query.enabled = true;
        config.raw_query.token_env = "REQUESTOR_TEST_TOKEN_UNSET".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(RequestorConfig::default().validate().is_ok());
    }
}
