//! Shared application state.

use crate::error::ApiError;
use crate::relay::Relay;
use requestor_core::{CatalogConfig, RequestorConfig};
use requestor_runtime::DataSource;
use std::sync::Arc;

/// Immutable state shared by all handlers. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RequestorConfig,
    source: Arc<dyn DataSource>,
    relay: Relay,
}

impl AppState {
    pub fn new(config: RequestorConfig, source: Arc<dyn DataSource>) -> Result<Self, ApiError> {
        let relay = Relay::new(config.ai_server.clone())?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                source,
                relay,
            }),
        })
    }

    pub fn config(&self) -> &RequestorConfig {
        &self.inner.config
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.inner.config.catalog
    }

    pub fn source(&self) -> &dyn DataSource {
        self.inner.source.as_ref()
    }

    pub fn relay(&self) -> &Relay {
        &self.inner.relay
    }
}
