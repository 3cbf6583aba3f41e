//! Request and response bodies for the HTTP endpoints.

use requestor_core::RequestIntent;
use serde::{Deserialize, Serialize};

/// Body of `ai_suggest`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuggestRequest {
    pub peek: Option<bool>,
}

impl SuggestRequest {
    pub fn intent(&self) -> RequestIntent {
        RequestIntent::from_peek(self.peek.unwrap_or(false))
    }
}

/// Body of `ai_query`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub prompt: Option<String>,
    pub peek: Option<bool>,
}

impl QueryRequest {
    pub fn intent(&self) -> RequestIntent {
        RequestIntent::from_peek(self.peek.unwrap_or(false))
    }
}

/// Body of `run_query`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunQueryRequest {
    pub query: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_peek_dispatches() {
        let request: SuggestRequest = serde_json::from_str(r#"{"peek": null}"#).unwrap();
        assert_eq!(request.intent(), RequestIntent::Dispatch);

        let request: QueryRequest =
            serde_json::from_str(r#"{"prompt": "hi", "peek": null}"#).unwrap();
        assert_eq!(request.intent(), RequestIntent::Dispatch);
        assert_eq!(request.prompt.as_deref(), Some("hi"));
    }

    #[test]
    fn test_peek_flag() {
        let request: QueryRequest = serde_json::from_str(r#"{"peek": true}"#).unwrap();
        assert_eq!(request.intent(), RequestIntent::Preview);
        assert!(request.prompt.is_none());
        assert_eq!(SuggestRequest::default().intent(), RequestIntent::Dispatch);
    }
}
