//! HTTP listener and endpoint gating configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Port to listen on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
        }
    }
}

impl ServerConfig {
    /// `addr:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }
}

/// Gate for the raw SQL endpoint.
///
/// The endpoint runs arbitrary SQL against the application database. It is
/// not mounted unless `enabled` is set, and then only answers requests that
/// carry the bearer token held in `token_env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQueryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for RawQueryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            token_env: default_token_env(),
        }
    }
}

impl RawQueryConfig {
    /// The configured token, if the environment variable is set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.is_empty())
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    8000
}

fn default_token_env() -> String {
    "REQUESTOR_RAW_QUERY_TOKEN".to_string()
}
