//! Explicit per-request context.
//!
//! Handlers receive the method, authorization header and raw body through a
//! [`RequestContext`] value instead of reading ambient request state. The
//! body is only parsed on demand, after the method has been checked.

use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, Method};
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    authorization: Option<String>,
    body: Bytes,
}

impl RequestContext {
    pub fn new(method: Method, authorization: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method,
            authorization,
            body: body.into(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Reject anything but POST.
    pub fn require_post(&self) -> Result<(), ApiError> {
        if self.method == Method::POST {
            Ok(())
        } else {
            Err(ApiError::InvalidRequest(
                "Only POST requests are allowed".to_string(),
            ))
        }
    }

    /// Token from an `Authorization: Bearer <token>` header.
    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
    }

    /// Parse the body as JSON. An empty body or a JSON `null` yields
    /// `T::default()`.
    pub fn json_body<T>(&self) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        let value: serde_json::Value = serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid JSON body: {}", e)))?;
        if value.is_null() {
            return Ok(T::default());
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid request body: {}", e)))
    }
}

impl<S> FromRequest<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

        Ok(Self::new(method, authorization, body))
    }
}
