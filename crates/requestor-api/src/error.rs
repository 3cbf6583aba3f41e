//! Error types for the API crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use requestor_core::ConfigError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers. None of them is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong method, malformed body, or a missing required field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or wrong bearer token on a gated endpoint.
    #[error("unauthorized")]
    Unauthorized,

    /// Missing or invalid configuration (e.g. no AI server URL).
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The AI server could not be reached or answered with a failure status.
    #[error("upstream AI server error: {0}")]
    UpstreamTransport(String),

    /// A raw SQL statement failed.
    #[error("query failed: {0}")]
    UnconstrainedQuery(String),

    /// A catalog or table read failed.
    #[error("database error: {0}")]
    Database(String),

    /// Failed to start the server.
    #[error("failed to start server: {0}")]
    StartupFailed(String),
}

impl ApiError {
    pub fn database(err: anyhow::Error) -> Self {
        ApiError::Database(format!("{:#}", err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Configuration(_) => "configuration_error",
            ApiError::UpstreamTransport(_) => "upstream_error",
            ApiError::UnconstrainedQuery(_) => "query_error",
            ApiError::Database(_) => "database_error",
            ApiError::StartupFailed(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
