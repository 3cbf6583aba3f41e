//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{any, get};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the router.
///
/// Data endpoints accept any method so that non-POST requests get a
/// descriptive client error instead of a bare 405. The raw SQL endpoint is
/// only mounted when enabled in configuration.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/ai_suggest", any(handlers::ai_suggest))
        .route("/api/ai_query", any(handlers::ai_query))
        .route("/api/schema_ai_query", any(handlers::schema_ai_query))
        .route("/api/stream_numbers", any(handlers::stream_numbers))
        .route("/health", get(handlers::health));

    if state.config().raw_query.enabled {
        tracing::warn!("Raw SQL endpoint enabled at /api/run_query");
        router = router.route("/api/run_query", any(handlers::run_query));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
