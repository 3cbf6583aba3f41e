//! Shared fixtures for the API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use requestor_api::{create_router, AppState};
use requestor_core::{CellValue, RequestorConfig, Row};
use requestor_runtime::memory::MemoryDataSource;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Environment variable that no test ever sets.
pub const UNSET_URL_ENV: &str = "REQUESTOR_TEST_NEVER_SET_URL";

/// A small site: one exportable table, one framework table, one table
/// that only has bookkeeping columns.
pub fn sample_source() -> MemoryDataSource {
    MemoryDataSource::new()
        .with_doctype(
            "Item",
            "Stock",
            &[
                ("name", "varchar"),
                ("owner", "varchar"),
                ("modified", "datetime"),
                ("item_name", "varchar"),
                ("valuation_rate", "decimal"),
                ("end_of_life", "date"),
            ],
            vec![
                Row::new()
                    .with("name", "SKU-001")
                    .with("owner", "Administrator")
                    .with("item_name", "Widget")
                    .with("valuation_rate", 12.5)
                    .with("end_of_life", NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()),
                Row::new()
                    .with("name", "SKU-002")
                    .with("item_name", CellValue::Null)
                    .with("valuation_rate", CellValue::Null)
                    .with("end_of_life", CellValue::Null),
            ],
        )
        .with_doctype(
            "Web Page",
            "Website",
            &[("name", "varchar"), ("title", "varchar")],
            vec![Row::new().with("name", "home").with("title", "Home")],
        )
        .with_doctype(
            "Audit Stub",
            "Stock",
            &[("owner", "varchar"), ("creation", "datetime"), ("idx", "int")],
            vec![],
        )
}

/// Config with no AI server configured.
pub fn offline_config() -> RequestorConfig {
    let mut config = RequestorConfig::default();
    config.ai_server.base_url_env = UNSET_URL_ENV.to_string();
    config
}

/// Config pointing at `base_url`.
pub fn config_with_upstream(base_url: &str) -> RequestorConfig {
    let mut config = offline_config();
    config.ai_server.base_url = Some(base_url.to_string());
    config
}

pub fn app(config: RequestorConfig, source: Arc<MemoryDataSource>) -> Router {
    let state = AppState::new(config, source).expect("state must build");
    create_router(state)
}

pub async fn send(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
