//! Application database configuration types.
//!
//! This module defines configuration for the MariaDB/MySQL database whose
//! catalog is introspected. Three configuration methods are supported:
//! 1. `database_url_env` - reference an environment variable
//! 2. `database_url` - provide the URL directly
//! 3. Individual fields (host, port, database, username, password)

use serde::{Deserialize, Serialize};

/// Configuration for the application database connection.
///
/// Supports three configuration methods (in order of precedence):
/// 1. Environment variable containing the full connection URL
/// 2. Direct connection URL
/// 3. Individual connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Environment variable name containing the MySQL connection URL.
    /// Highest precedence.
    #[serde(
        default = "default_database_url_env",
        skip_serializing_if = "Option::is_none"
    )]
    pub database_url_env: Option<String>,

    /// Full MySQL connection URL.
    /// Second precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Hostname of the database server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the database server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database (schema) name to connect to.
    #[serde(default = "default_database")]
    pub database: String,

    /// Username for the connection.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password for the connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Connection pool configuration.
    #[serde(default)]
    pub pool: ConnectionPoolConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url_env: default_database_url_env(),
            database_url: None,
            host: default_host(),
            port: default_port(),
            database: default_database(),
            username: default_username(),
            password: None,
            password_env: None,
            pool: ConnectionPoolConfig::default(),
        }
    }
}

/// Connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionPoolConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Timeout in seconds when acquiring a connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    30
}

impl DatabaseConfig {
    /// Build a MySQL connection string from this configuration.
    ///
    /// Precedence:
    /// 1. database_url_env (environment variable, if set)
    /// 2. database_url (direct URL)
    /// 3. Individual fields
    pub fn connection_string(&self) -> String {
        if let Some(env_var) = &self.database_url_env
            && let Ok(url) = std::env::var(env_var)
        {
            return url;
        }

        if let Some(url) = &self.database_url {
            return url.clone();
        }

        match self.get_password() {
            Some(password) => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.username, password, self.host, self.port, self.database
            ),
            None => format!(
                "mysql://{}@{}:{}/{}",
                self.username, self.host, self.port, self.database
            ),
        }
    }

    /// Get the password, checking password_env first.
    fn get_password(&self) -> Option<String> {
        if let Some(env_var) = &self.password_env
            && let Ok(password) = std::env::var(env_var)
        {
            return Some(password);
        }
        self.password.clone()
    }

    /// Connection string with any password replaced, for logging.
    pub fn redacted_connection_string(&self) -> String {
        let raw = self.connection_string();
        match url::Url::parse(&raw) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            _ => raw,
        }
    }
}

fn default_database_url_env() -> Option<String> {
    Some("DATABASE_URL".to_string())
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_database() -> String {
    "frappe".to_string()
}

fn default_username() -> String {
    "root".to_string()
}
