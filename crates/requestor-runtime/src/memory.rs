//! In-memory [`DataSource`] for tests and local demos.
//!
//! Entity definitions and tables are registered up front. Every trait call
//! bumps a counter so callers can assert that no database access happened.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use requestor_core::{CatalogConfig, ColumnDescriptor, Row};

use crate::source::DataSource;

/// Catalog entry for one entity definition.
#[derive(Debug, Clone)]
pub struct EntityDefinition {
    pub name: String,
    pub module: String,
    pub is_single: bool,
    pub is_child_table: bool,
    pub is_virtual: bool,
    pub custom: bool,
}

impl EntityDefinition {
    /// A regular, exportable entity owned by `module`.
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            is_single: false,
            is_child_table: false,
            is_virtual: false,
            custom: false,
        }
    }

    fn is_candidate(&self, catalog: &CatalogConfig) -> bool {
        !self.is_single
            && !self.is_child_table
            && !self.is_virtual
            && !self.custom
            && !catalog.is_excluded_module(&self.module)
    }
}

struct StoredTable {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
}

/// In-memory data source keyed by physical table name.
#[derive(Default)]
pub struct MemoryDataSource {
    entities: Vec<EntityDefinition>,
    tables: HashMap<String, StoredTable>,
    sql_results: HashMap<String, Vec<Row>>,
    calls: AtomicUsize,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: EntityDefinition) -> Self {
        self.entities.push(entity);
        self
    }

    /// Register a physical table. `columns` are `(name, type)` pairs.
    pub fn with_table(
        mut self,
        storage_name: &str,
        columns: &[(&str, &str)],
        rows: Vec<Row>,
    ) -> Self {
        let columns = columns
            .iter()
            .map(|(n, t)| ColumnDescriptor::new(*n, *t))
            .collect();
        self.tables
            .insert(storage_name.to_string(), StoredTable { columns, rows });
        self
    }

    /// Register an entity owned by `module` together with its `tab`-prefixed table.
    pub fn with_doctype(
        self,
        name: &str,
        module: &str,
        columns: &[(&str, &str)],
        rows: Vec<Row>,
    ) -> Self {
        let storage_name = CatalogConfig::default().storage_name(name);
        self.with_entity(EntityDefinition::new(name, module))
            .with_table(&storage_name, columns, rows)
    }

    /// Canned result for [`DataSource::run_sql`].
    pub fn with_sql_result(mut self, sql: &str, rows: Vec<Row>) -> Self {
        self.sql_results.insert(sql.trim().to_string(), rows);
        self
    }

    /// Number of data source calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn list_entities(&self, catalog: &CatalogConfig) -> Result<Vec<String>> {
        self.touch();
        Ok(self
            .entities
            .iter()
            .filter(|e| e.is_candidate(catalog))
            .map(|e| e.name.clone())
            .collect())
    }

    async fn table_columns(&self, storage_name: &str) -> Result<Vec<ColumnDescriptor>> {
        self.touch();
        Ok(self
            .tables
            .get(storage_name)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn select_rows(&self, storage_name: &str, columns: &[String]) -> Result<Vec<Row>> {
        self.touch();
        let table = self
            .tables
            .get(storage_name)
            .ok_or_else(|| anyhow::anyhow!("Table '{}' doesn't exist", storage_name))?;

        if let Some(missing) = columns
            .iter()
            .find(|c| !table.columns.iter().any(|tc| &tc.name == *c))
        {
            anyhow::bail!("Unknown column '{}' in '{}'", missing, storage_name);
        }

        Ok(table
            .rows
            .iter()
            .cloned()
            .map(|row| row.project(columns))
            .collect())
    }

    async fn run_sql(&self, sql: &str) -> Result<Vec<Row>> {
        self.touch();
        self.sql_results
            .get(sql.trim())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("You have an error in your SQL syntax near '{}'", sql))
    }
}
