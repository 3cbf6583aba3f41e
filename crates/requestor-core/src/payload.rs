//! Wire payloads sent to the AI server (or returned directly in preview).

use crate::config::AiServerConfig;
use crate::record::RecordBatch;
use crate::schema::SchemaSnapshot;
use serde::Serialize;

/// Exported rows for one table, keyed by logical table name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableExport {
    pub table: String,
    pub data: RecordBatch,
}

/// The request-scoped unit that is either previewed or relayed upstream.
///
/// Serializes as `{"schema": ...}` or `{"prompt": ..., "data": [...]}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportPayload {
    Suggest {
        schema: SchemaSnapshot,
    },
    Query {
        prompt: String,
        data: Vec<TableExport>,
    },
}

impl ExportPayload {
    pub fn suggest(schema: SchemaSnapshot) -> Self {
        ExportPayload::Suggest { schema }
    }

    pub fn query(prompt: impl Into<String>, data: Vec<TableExport>) -> Self {
        ExportPayload::Query {
            prompt: prompt.into(),
            data,
        }
    }

    /// Upstream path this payload is posted to.
    pub fn endpoint_path<'a>(&self, config: &'a AiServerConfig) -> &'a str {
        match self {
            ExportPayload::Suggest { .. } => &config.suggest_path,
            ExportPayload::Query { .. } => &config.query_path,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportPayload::Suggest { .. } => "suggest",
            ExportPayload::Query { .. } => "query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Row;
    use crate::schema::{ColumnDescriptor, TableDescriptor};
    use serde_json::json;

    #[test]
    fn test_suggest_shape() {
        let schema = SchemaSnapshot::new(vec![TableDescriptor::new(
            "Item",
            "tabItem",
            vec![ColumnDescriptor::new("item_code", "varchar")],
        )]);
        let payload = ExportPayload::suggest(schema);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"schema": {"Item": {"item_code": "varchar"}}})
        );
        assert_eq!(
            payload.endpoint_path(&AiServerConfig::default()),
            "/api/ai-suggest"
        );
    }

    #[test]
    fn test_query_shape() {
        let data = vec![TableExport {
            table: "Item".to_string(),
            data: RecordBatch::from_rows(vec![Row::new().with("item_code", "SKU-1")]),
        }];
        let payload = ExportPayload::query("top items?", data);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "prompt": "top items?",
                "data": [{"table": "Item", "data": [{"item_code": "SKU-1"}]}]
            })
        );
        assert_eq!(
            payload.endpoint_path(&AiServerConfig::default()),
            "/api/ai-query"
        );
    }
}
