//! CLI command implementations.

pub mod check;
pub mod preview;
pub mod serve;

use anyhow::Context;
use requestor_adapter_mysql::MySqlDataSource;
use requestor_core::RequestorConfig;
use std::path::Path;

/// Load and validate the configuration at `path`.
pub fn load_config(path: &Path) -> anyhow::Result<RequestorConfig> {
    let config = RequestorConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.validate().context("Invalid configuration")?;

    if path.exists() {
        tracing::info!(config = %path.display(), "Loaded configuration");
    } else {
        tracing::info!(config = %path.display(), "Configuration file not found, using defaults");
    }
    Ok(config)
}

/// Open the database pool described by `config`.
pub async fn connect(config: &RequestorConfig) -> anyhow::Result<MySqlDataSource> {
    MySqlDataSource::connect(&config.database)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                config.database.redacted_connection_string()
            )
        })
}
