//! Request handlers.
//!
//! Every data endpoint checks the method first, then parses the body, and
//! only then touches the database. Preview requests return the assembled
//! payload; dispatch requests stream the AI server's answer back.

use crate::api_types::{HealthResponse, QueryRequest, RunQueryRequest, SuggestRequest};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use requestor_core::{ExportPayload, RequestIntent};
use requestor_runtime::{collect_schema, export_data};

/// Send the database schema to the AI server for suggestions.
pub async fn ai_suggest(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, ApiError> {
    ctx.require_post()?;
    let request: SuggestRequest = ctx.json_body()?;

    let schema = collect_schema(state.source(), state.catalog())
        .await
        .map_err(ApiError::database)?;
    tracing::info!(
        request_id = %ctx.request_id(),
        tables = schema.len(),
        intent = ?request.intent(),
        "ai_suggest"
    );

    respond(&state, &ctx, request.intent(), ExportPayload::suggest(schema)).await
}

/// Send the prompt plus all exportable table data to the AI server.
pub async fn ai_query(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, ApiError> {
    ctx.require_post()?;
    let request: QueryRequest = ctx.json_body()?;
    let intent = request.intent();
    let prompt = request.prompt.ok_or_else(|| {
        ApiError::InvalidRequest(r#"Missing ["prompt"] in request body"#.to_string())
    })?;

    let schema = collect_schema(state.source(), state.catalog())
        .await
        .map_err(ApiError::database)?;
    let data = export_data(state.source(), &schema)
        .await
        .map_err(ApiError::database)?;
    tracing::info!(
        request_id = %ctx.request_id(),
        tables = data.len(),
        intent = ?intent,
        "ai_query"
    );

    respond(&state, &ctx, intent, ExportPayload::query(prompt, data)).await
}

/// Run an arbitrary SQL statement. Only routed when `raw_query.enabled`.
pub async fn run_query(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, ApiError> {
    ctx.require_post()?;

    let expected = state.config().raw_query.token().ok_or(ApiError::Unauthorized)?;
    if ctx.bearer_token() != Some(expected.as_str()) {
        return Err(ApiError::Unauthorized);
    }

    let request: RunQueryRequest = ctx.json_body()?;
    let query = request.query.ok_or_else(|| {
        ApiError::InvalidRequest(r#"Missing ["query"] in request body"#.to_string())
    })?;

    tracing::warn!(request_id = %ctx.request_id(), "Executing raw SQL");
    let rows = state
        .source()
        .run_sql(&query)
        .await
        .map_err(|e| ApiError::UnconstrainedQuery(format!("{:#}", e)))?;

    let rows: Vec<serde_json::Value> = rows.iter().map(|r| r.to_json()).collect();
    Ok(Json(rows).into_response())
}

/// Declared but unimplemented; accepts POST and returns nothing.
pub async fn schema_ai_query(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    ctx.require_post()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Declared but unimplemented; accepts POST and returns nothing.
pub async fn stream_numbers(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    ctx.require_post()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle health check requests.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "requestor",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn respond(
    state: &AppState,
    ctx: &RequestContext,
    intent: RequestIntent,
    payload: ExportPayload,
) -> Result<Response, ApiError> {
    match intent {
        RequestIntent::Preview => Ok(Json(payload).into_response()),
        RequestIntent::Dispatch => {
            let body = state.relay().dispatch(&payload).await?;
            tracing::debug!(
                request_id = %ctx.request_id(),
                kind = payload.kind(),
                "Relaying upstream response"
            );
            Ok(body.into_response())
        }
    }
}
