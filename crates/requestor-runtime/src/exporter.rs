//! Table data export.

use crate::source::DataSource;
use requestor_core::{RecordBatch, SchemaSnapshot, TableExport};

/// Dump every table in `schema` as filtered records.
///
/// Each table is read in full (no pagination). Null fields are dropped,
/// empty records are dropped, and tables without any remaining record are
/// left out. Output follows the snapshot's table order and uses logical
/// table names.
pub async fn export_data<S>(source: &S, schema: &SchemaSnapshot) -> anyhow::Result<Vec<TableExport>>
where
    S: DataSource + ?Sized,
{
    let mut exports = Vec::new();

    for table in schema.tables() {
        if table.is_empty() {
            continue;
        }

        let rows = source
            .select_rows(table.storage_name(), &table.column_names())
            .await?;
        let row_count = rows.len();
        let data = RecordBatch::from_rows(rows);

        tracing::trace!(
            table = %table.name(),
            rows = row_count,
            records = data.len(),
            "Exported table"
        );

        if data.is_empty() {
            continue;
        }

        exports.push(TableExport {
            table: table.name().to_string(),
            data,
        });
    }

    tracing::debug!(tables = exports.len(), "Exported data");
    Ok(exports)
}
