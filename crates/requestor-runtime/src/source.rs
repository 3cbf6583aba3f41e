use async_trait::async_trait;
use requestor_core::{CatalogConfig, ColumnDescriptor, Row};

/// Read access to the application database.
///
/// Implementations run plain, non-transactional reads. Every call hits the
/// live database; nothing is cached between requests.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Logical names of user-defined, non-single, non-child, non-virtual,
    /// non-custom entity definitions whose module is not excluded.
    async fn list_entities(&self, catalog: &CatalogConfig) -> anyhow::Result<Vec<String>>;

    /// Columns of a physical table as reported by the catalog. An unknown
    /// table yields an empty list.
    async fn table_columns(&self, storage_name: &str) -> anyhow::Result<Vec<ColumnDescriptor>>;

    /// All rows of a physical table, restricted to `columns`. No ordering
    /// is imposed; rows come back in the database's default order.
    async fn select_rows(&self, storage_name: &str, columns: &[String])
        -> anyhow::Result<Vec<Row>>;

    /// Execute an arbitrary SQL statement and return its rows.
    async fn run_sql(&self, sql: &str) -> anyhow::Result<Vec<Row>>;
}
