//! Upstream AI server configuration.
//!
//! The AI server is a single HTTP endpoint that receives schema or data
//! payloads and answers with a streamed JSON body.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the local AI server that payloads are relayed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiServerConfig {
    /// Environment variable holding the base URL. Highest precedence.
    #[serde(default = "default_base_url_env")]
    pub base_url_env: String,

    /// Base URL, used when the environment variable is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Total request timeout in seconds. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Path appended to the base URL for schema suggestions.
    #[serde(default = "default_suggest_path")]
    pub suggest_path: String,

    /// Path appended to the base URL for prompt queries.
    #[serde(default = "default_query_path")]
    pub query_path: String,
}

impl Default for AiServerConfig {
    fn default() -> Self {
        Self {
            base_url_env: default_base_url_env(),
            base_url: None,
            timeout_seconds: None,
            suggest_path: default_suggest_path(),
            query_path: default_query_path(),
        }
    }
}

impl AiServerConfig {
    /// Resolve the base URL without a trailing slash.
    ///
    /// Fails with [`ConfigError::MissingAiServerUrl`] when neither the
    /// environment variable nor `base_url` is set, and with
    /// [`ConfigError::Config`] when the value is not an absolute http(s) URL.
    pub fn resolve_base_url(&self) -> Result<String, ConfigError> {
        let raw = std::env::var(&self.base_url_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .ok_or_else(|| ConfigError::MissingAiServerUrl(self.base_url_env.clone()))?;

        let raw = raw.trim();
        let parsed = url::Url::parse(raw).map_err(|e| {
            ConfigError::Config(format!("invalid AI server URL '{}': {}", raw, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Config(format!(
                "AI server URL '{}' must use http or https",
                raw
            )));
        }

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Join the resolved base URL with an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> Result<String, ConfigError> {
        Ok(format!("{}{}", self.resolve_base_url()?, path))
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

fn default_base_url_env() -> String {
    "LOCAL_SERVER_URL".to_string()
}

fn default_suggest_path() -> String {
    "/api/ai-suggest".to_string()
}

fn default_query_path() -> String {
    "/api/ai-query".to_string()
}
