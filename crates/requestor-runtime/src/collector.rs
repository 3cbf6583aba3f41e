//! Schema collection.

use crate::source::DataSource;
use requestor_core::{CatalogConfig, ColumnDescriptor, SchemaSnapshot, TableDescriptor};

/// Build a [`SchemaSnapshot`] from the live catalog.
///
/// Candidate entities come from the data source (module exclusions are
/// applied there). System fields are removed from each table and tables
/// left with no columns are skipped. An empty snapshot is a valid result.
pub async fn collect_schema<S>(
    source: &S,
    catalog: &CatalogConfig,
) -> anyhow::Result<SchemaSnapshot>
where
    S: DataSource + ?Sized,
{
    let entities = source.list_entities(catalog).await?;
    let mut tables = Vec::with_capacity(entities.len());

    for name in entities {
        let storage_name = catalog.storage_name(&name);
        let columns: Vec<ColumnDescriptor> = source
            .table_columns(&storage_name)
            .await?
            .into_iter()
            .filter(|c| !catalog.is_system_field(&c.name))
            .collect();

        if columns.is_empty() {
            tracing::trace!(table = %storage_name, "No exportable columns, skipping");
            continue;
        }

        tables.push(TableDescriptor::new(name, storage_name, columns));
    }

    let snapshot = SchemaSnapshot::new(tables);
    tracing::debug!(
        tables = snapshot.len(),
        columns = snapshot.column_count(),
        "Collected schema"
    );
    Ok(snapshot)
}
