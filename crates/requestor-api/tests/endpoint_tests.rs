//! End-to-end tests for the HTTP endpoints.
//!
//! The database is the in-memory data source; the AI server is a local axum
//! app bound to an ephemeral port.

mod common;

use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::*;
use requestor_core::Row;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Captured = Arc<Mutex<Vec<(String, Value)>>>;

/// Fake AI server that records every payload and answers with a fixed body.
async fn recording_upstream(status: StatusCode) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    async fn suggest(
        State((captured, status)): State<(Captured, StatusCode)>,
        Json(body): Json<Value>,
    ) -> (StatusCode, &'static str) {
        captured.lock().unwrap().push(("suggest".to_string(), body));
        (status, r#"{"suggestions":["Top customers"]}"#)
    }

    async fn query(
        State((captured, status)): State<(Captured, StatusCode)>,
        Json(body): Json<Value>,
    ) -> (StatusCode, &'static str) {
        captured.lock().unwrap().push(("query".to_string(), body));
        (status, r#"{"answer":"42"}"#)
    }

    let router = Router::new()
        .route("/api/ai-suggest", post(suggest))
        .route("/api/ai-query", post(query))
        .with_state((captured.clone(), status));

    (spawn_upstream(router).await, captured)
}

#[tokio::test]
async fn test_non_post_rejected_before_database_access() {
    let source = Arc::new(sample_source());
    for path in ["/api/ai_suggest", "/api/ai_query"] {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let response = send(app(offline_config(), source.clone()), method, path, "").await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"], "invalid_request");
            assert!(body["message"].as_str().unwrap().contains("Only POST"));
        }
    }
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_ai_suggest_peek_returns_logical_schema() {
    let source = Arc::new(sample_source());
    let response = send(
        app(offline_config(), source),
        Method::POST,
        "/api/ai_suggest",
        r#"{"peek": true}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "schema": {
                "Item": {
                    "name": "varchar",
                    "item_name": "varchar",
                    "valuation_rate": "decimal",
                    "end_of_life": "date"
                }
            }
        })
    );
}

#[tokio::test]
async fn test_ai_suggest_peek_matches_dispatched_payload() {
    let (upstream, captured) = recording_upstream(StatusCode::OK).await;
    let source = Arc::new(sample_source());

    let peek = body_json(
        send(
            app(config_with_upstream(&upstream), source.clone()),
            Method::POST,
            "/api/ai_suggest",
            r#"{"peek": true}"#,
        )
        .await,
    )
    .await;

    let response = send(
        app(config_with_upstream(&upstream), source),
        Method::POST,
        "/api/ai_suggest",
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        body_bytes(response).await,
        br#"{"suggestions":["Top customers"]}"#.to_vec()
    );

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].0, "suggest");
    assert_eq!(captured[0].1, peek);
}

#[tokio::test]
async fn test_ai_query_requires_prompt() {
    let source = Arc::new(sample_source());
    for body in ["", "{}", r#"{"peek": true}"#, "null"] {
        let response = send(
            app(offline_config(), source.clone()),
            Method::POST,
            "/api/ai_query",
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("prompt"));
    }
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_ai_query_peek_returns_filtered_data() {
    let source = Arc::new(sample_source());
    let response = send(
        app(offline_config(), source),
        Method::POST,
        "/api/ai_query",
        r#"{"prompt": "Which items expire?", "peek": true}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "prompt": "Which items expire?",
            "data": [{
                "table": "Item",
                "data": [
                    {
                        "name": "SKU-001",
                        "item_name": "Widget",
                        "valuation_rate": 12.5,
                        "end_of_life": "2099-12-31"
                    },
                    { "name": "SKU-002" }
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_ai_query_dispatch_relays_payload() {
    let (upstream, captured) = recording_upstream(StatusCode::OK).await;
    let response = send(
        app(config_with_upstream(&upstream), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_query",
        r#"{"prompt": "How many items?"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, br#"{"answer":"42"}"#.to_vec());

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].0, "query");
    assert_eq!(captured[0].1["prompt"], "How many items?");
    assert_eq!(captured[0].1["data"][0]["table"], "Item");
}

#[tokio::test]
async fn test_preview_works_without_ai_server() {
    let response = send(
        app(offline_config(), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_suggest",
        r#"{"peek": true}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dispatch_without_ai_server_is_configuration_error() {
    let response = send(
        app(offline_config(), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_suggest",
        "{}",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "configuration_error");
    assert!(body["message"].as_str().unwrap().contains(UNSET_URL_ENV));
}

#[tokio::test]
async fn test_null_peek_means_dispatch() {
    let source = Arc::new(sample_source());
    for (path, body) in [
        ("/api/ai_suggest", r#"{"peek": null}"#),
        ("/api/ai_query", r#"{"prompt": "hi", "peek": null}"#),
    ] {
        let response = send(app(offline_config(), source.clone()), Method::POST, path, body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", path);
        assert_eq!(body_json(response).await["error"], "configuration_error");
    }
}

#[tokio::test]
async fn test_upstream_failure_status_is_transport_error() {
    let (upstream, _captured) = recording_upstream(StatusCode::SERVICE_UNAVAILABLE).await;
    let response = send(
        app(config_with_upstream(&upstream), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_query",
        r#"{"prompt": "hi"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "upstream_error");
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let upstream = dead_upstream().await;
    let response = send(
        app(config_with_upstream(&upstream), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_suggest",
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_request() {
    let response = send(
        app(offline_config(), Arc::new(sample_source())),
        Method::POST,
        "/api/ai_suggest",
        "{not json",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_placeholders_accept_post_only() {
    for path in ["/api/schema_ai_query", "/api/stream_numbers"] {
        let response = send(
            app(offline_config(), Arc::new(sample_source())),
            Method::POST,
            path,
            "",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            app(offline_config(), Arc::new(sample_source())),
            Method::GET,
            path,
            "",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_health() {
    let response = send(
        app(offline_config(), Arc::new(sample_source())),
        Method::GET,
        "/health",
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_run_query_not_mounted_by_default() {
    let source = Arc::new(sample_source());
    let response = send(
        app(offline_config(), source.clone()),
        Method::POST,
        "/api/run_query",
        r#"{"query": "SELECT 1"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(source.call_count(), 0);
}

const RAW_TOKEN_ENV: &str = "REQUESTOR_TEST_RAW_QUERY_TOKEN";

fn raw_query_app(source: Arc<requestor_runtime::memory::MemoryDataSource>) -> Router {
    // SAFETY: test-local variable name, always set to the same value
    unsafe {
        std::env::set_var(RAW_TOKEN_ENV, "letmein");
    }
    let mut config = offline_config();
    config.raw_query.enabled = true;
    config.raw_query.token_env = RAW_TOKEN_ENV.to_string();
    app(config, source)
}

async fn send_raw(app: Router, token: Option<&str>, body: &str) -> axum::response::Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/run_query");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    app.oneshot(builder.body(axum::body::Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_run_query_requires_token() {
    let source = Arc::new(sample_source());
    let response = send_raw(raw_query_app(source.clone()), None, r#"{"query": "SELECT 1"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_raw(
        raw_query_app(source.clone()),
        Some("wrong"),
        r#"{"query": "SELECT 1"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_run_query_requires_query_field() {
    let response = send_raw(raw_query_app(Arc::new(sample_source())), Some("letmein"), "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_json(response).await["message"]
            .as_str()
            .unwrap()
            .contains("query")
    );
}

#[tokio::test]
async fn test_run_query_returns_raw_rows() {
    let source = sample_source().with_sql_result(
        "SELECT name, item_name FROM `tabItem`",
        vec![
            Row::new().with("name", "SKU-001").with("item_name", "Widget"),
            Row::new()
                .with("name", "SKU-002")
                .with("item_name", requestor_core::CellValue::Null),
        ],
    );
    let response = send_raw(
        raw_query_app(Arc::new(source)),
        Some("letmein"),
        r#"{"query": "SELECT name, item_name FROM `tabItem`"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            {"name": "SKU-001", "item_name": "Widget"},
            {"name": "SKU-002", "item_name": null}
        ])
    );
}

#[tokio::test]
async fn test_run_query_sql_error_is_internal() {
    let response = send_raw(
        raw_query_app(Arc::new(sample_source())),
        Some("letmein"),
        r#"{"query": "SELEC oops"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "query_error");
}
