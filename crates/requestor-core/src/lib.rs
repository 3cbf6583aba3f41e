use serde::{Deserialize, Serialize};

// Configuration types shared across all requestor crates
pub mod config;

pub mod payload;
pub mod record;
pub mod schema;

pub use config::{
    AiServerConfig, CatalogConfig, ConfigError, DatabaseConfig, RawQueryConfig,
    RequestorConfig, ServerConfig,
};
pub use payload::{ExportPayload, TableExport};
pub use record::{CellValue, Record, RecordBatch, Row};
pub use schema::{ColumnDescriptor, SchemaSnapshot, TableDescriptor};

/// What the caller wants done with an assembled payload.
///
/// `Preview` returns the payload as-is without contacting the AI server
/// (the `peek` flag); `Dispatch` relays it upstream and streams the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestIntent {
    Preview,
    #[default]
    Dispatch,
}

impl RequestIntent {
    pub fn from_peek(peek: bool) -> Self {
        if peek {
            RequestIntent::Preview
        } else {
            RequestIntent::Dispatch
        }
    }

    pub fn is_preview(self) -> bool {
        matches!(self, RequestIntent::Preview)
    }
}
