//! Introspected schema types.
//!
//! A [`SchemaSnapshot`] is built fresh on every request from the live catalog
//! and is never mutated afterwards. It serializes as
//! `{ "<table>": { "<column>": "<type>" } }` using logical table names, in
//! the order the collector enumerated them.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single column and its declared SQL type (e.g. `varchar`, `decimal`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// One introspectable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Logical entity name, e.g. `Sales Order`.
    name: String,
    /// Physical table name, e.g. `tabSales Order`.
    storage_name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(
        name: impl Into<String>,
        storage_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            storage_name: storage_name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Ordered mapping from logical table name to its columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    tables: Vec<TableDescriptor>,
}

impl SchemaSnapshot {
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Look up a table by logical name.
    pub fn get(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total column count across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

impl FromIterator<TableDescriptor> for SchemaSnapshot {
    fn from_iter<I: IntoIterator<Item = TableDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

struct ColumnMap<'a>(&'a [ColumnDescriptor]);

impl Serialize for ColumnMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for column in self.0 {
            map.serialize_entry(&column.name, &column.data_type)?;
        }
        map.end()
    }
}

impl Serialize for SchemaSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(&table.name, &ColumnMap(&table.columns))?;
        }
        map.end()
    }
}
