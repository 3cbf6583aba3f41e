//! Streaming relay to the AI server.
//!
//! A payload is serialized once, POSTed to `{base_url}{endpoint_path}`, and
//! the upstream body is handed back as a byte stream that is forwarded to
//! the caller chunk by chunk. Nothing is buffered, inspected or retried.
//! A connect failure or non-success status becomes
//! [`ApiError::UpstreamTransport`]; a failure after streaming has started
//! aborts the caller's response. Dropping the stream (e.g. because the
//! client disconnected) drops the upstream connection with it.

use crate::error::ApiError;
use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use requestor_core::{AiServerConfig, ConfigError, ExportPayload};
use serde::Serialize;

/// Upstream body as received, one item per network chunk.
pub type ChunkStream = BoxStream<'static, Result<Bytes, reqwest::Error>>;

/// HTTP client bound to the configured AI server.
#[derive(Debug, Clone)]
pub struct Relay {
    client: reqwest::Client,
    config: AiServerConfig,
}

impl Relay {
    pub fn new(config: AiServerConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// POST `payload` as JSON to `endpoint_path` and return the response
    /// body as a stream.
    pub async fn relay<T>(&self, endpoint_path: &str, payload: &T) -> Result<RelayedBody, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config.endpoint_url(endpoint_path)?;

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::UpstreamTransport(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamTransport(format!(
                "{} returned {}",
                url, status
            )));
        }

        tracing::debug!(url = %url, status = %status, "Streaming upstream response");
        Ok(RelayedBody {
            stream: response.bytes_stream().boxed(),
        })
    }

    /// Relay an [`ExportPayload`] to the endpoint matching its kind.
    pub async fn dispatch(&self, payload: &ExportPayload) -> Result<RelayedBody, ApiError> {
        let path = payload.endpoint_path(&self.config).to_string();
        self.relay(&path, payload).await
    }
}

/// An upstream response body ready to be streamed to the caller with
/// `content-type: application/json`.
pub struct RelayedBody {
    stream: ChunkStream,
}

impl RelayedBody {
    pub fn into_stream(self) -> ChunkStream {
        self.stream
    }
}

impl IntoResponse for RelayedBody {
    fn into_response(self) -> Response {
        let stream = self
            .stream
            .inspect_err(|e| tracing::warn!(error = %e, "Upstream stream aborted"));
        (
            [(header::CONTENT_TYPE, "application/json")],
            Body::from_stream(stream),
        )
            .into_response()
    }
}
