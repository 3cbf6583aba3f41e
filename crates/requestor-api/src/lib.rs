//! # requestor-api
//!
//! HTTP surface of the AI requestor service.
//!
//! | Path | Body | Response |
//! |------|------|----------|
//! | `POST /api/ai_suggest` | `{peek?}` | peek: `{schema}`; else streamed AI answer |
//! | `POST /api/ai_query` | `{prompt, peek?}` | peek: `{prompt, data}`; else streamed AI answer |
//! | `POST /api/run_query` | `{query}` | raw rows; only when enabled, bearer token required |
//! | `POST /api/schema_ai_query` | - | 204, placeholder |
//! | `POST /api/stream_numbers` | - | 204, placeholder |
//! | `GET /health` | - | service status |
//!
//! Errors are JSON: `{"error": "<code>", "message": "<text>"}`.

pub mod api_types;
pub mod context;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod routes;
pub mod server;
pub mod state;

pub use context::RequestContext;
pub use error::ApiError;
pub use relay::{Relay, RelayedBody};
pub use routes::create_router;
pub use server::RequestorServer;
pub use state::AppState;
