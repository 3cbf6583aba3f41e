use async_trait::async_trait;
use requestor_core::{CatalogConfig, ColumnDescriptor, DatabaseConfig, Row};
use requestor_runtime::DataSource;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

pub mod decode;
pub mod introspect;

/// [`DataSource`] backed by a MariaDB/MySQL connection pool.
pub struct MySqlDataSource {
    pool: MySqlPool,
}

impl MySqlDataSource {
    /// Connect using the pool settings from `config`.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        tracing::debug!(url = %config.redacted_connection_string(), "Connecting to database");
        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_seconds))
            .connect(&config.connection_string())
            .await?;
        Ok(Self { pool })
    }

    /// Server version string; doubles as a connectivity check.
    pub async fn server_version(&self) -> anyhow::Result<String> {
        let (version,): (String,) = sqlx::query_as("SELECT CAST(VERSION() AS CHAR)")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }
}

#[async_trait]
impl DataSource for MySqlDataSource {
    async fn list_entities(&self, catalog: &CatalogConfig) -> anyhow::Result<Vec<String>> {
        introspect::list_entities(&self.pool, catalog).await
    }

    async fn table_columns(&self, storage_name: &str) -> anyhow::Result<Vec<ColumnDescriptor>> {
        introspect::table_columns(&self.pool, storage_name).await
    }

    async fn select_rows(
        &self,
        storage_name: &str,
        columns: &[String],
    ) -> anyhow::Result<Vec<Row>> {
        let sql = introspect::select_query(storage_name, columns);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(decode::row_from_mysql).collect())
    }

    async fn run_sql(&self, sql: &str) -> anyhow::Result<Vec<Row>> {
        // Text protocol: arbitrary statements, not just preparable ones.
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(decode::row_from_mysql).collect())
    }
}
