//! HTTP server.

use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;
use requestor_core::ServerConfig;
use tokio::net::TcpListener;

/// The requestor HTTP server.
pub struct RequestorServer {
    config: ServerConfig,
    state: AppState,
}

impl RequestorServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<(), ApiError> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::StartupFailed(format!("failed to bind {}: {}", addr, e)))?;

        tracing::info!(address = %addr, "Requestor listening");

        axum::serve(listener, routes::create_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::StartupFailed(e.to_string()))?;

        tracing::info!("Requestor stopped");
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
