//! `requestor serve` - start the HTTP server.

use requestor_api::{AppState, RequestorServer};
use std::path::Path;
use std::sync::Arc;

/// Start the server and block until Ctrl-C.
pub async fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let source = super::connect(&config).await?;

    match config.ai_server.resolve_base_url() {
        Ok(url) => tracing::info!(ai_server = %url, "AI server configured"),
        Err(e) => tracing::warn!(
            error = %e,
            "Dispatch requests will fail until the AI server URL is set"
        ),
    }

    let server_config = config.server.clone();
    let state = AppState::new(config, Arc::new(source))?;
    let server = RequestorServer::new(server_config, state);

    tracing::info!(address = %server.bind_address(), "Starting requestor");
    server.run().await?;
    Ok(())
}
