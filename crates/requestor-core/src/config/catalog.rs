//! Catalog filtering configuration.
//!
//! The application database stores one physical table per entity definition,
//! named `{table_prefix}{name}`. Entities owned by framework modules and
//! bookkeeping columns present on every table are hidden from exports.

use serde::{Deserialize, Serialize};

/// Modules whose entity definitions are never exported.
pub const DEFAULT_EXCLUDED_MODULES: &[&str] = &[
    "Core",
    "Website",
    "Workflow",
    "Email",
    "Custom",
    "Geo",
    "Desk",
    "Printing",
    "Data Migration",
    "Automation",
    "Social",
    "Authentication",
    "File",
    "Integrations",
    "Contacts",
];

/// Framework-managed columns stripped from every table.
pub const DEFAULT_SYSTEM_FIELDS: &[&str] = &[
    "owner",
    "creation",
    "modified",
    "modified_by",
    "parent",
    "parentfield",
    "parenttype",
    "idx",
    "docstatus",
    "_user_tags",
    "_comments",
    "_assign",
    "_liked_by",
];

/// Physical table name prefix.
pub const DEFAULT_TABLE_PREFIX: &str = "tab";

/// Catalog filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Prefix prepended to an entity name to get its physical table name.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Owning modules excluded from introspection.
    #[serde(default = "default_excluded_modules")]
    pub excluded_modules: Vec<String>,

    /// Column names removed from every table.
    #[serde(default = "default_system_fields")]
    pub system_fields: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table_prefix: default_table_prefix(),
            excluded_modules: default_excluded_modules(),
            system_fields: default_system_fields(),
        }
    }
}

impl CatalogConfig {
    /// Physical table name for a logical entity name.
    pub fn storage_name(&self, logical: &str) -> String {
        format!("{}{}", self.table_prefix, logical)
    }

    pub fn is_system_field(&self, column: &str) -> bool {
        self.system_fields.iter().any(|f| f == column)
    }

    pub fn is_excluded_module(&self, module: &str) -> bool {
        self.excluded_modules.iter().any(|m| m == module)
    }
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

fn default_excluded_modules() -> Vec<String> {
    DEFAULT_EXCLUDED_MODULES.iter().map(|s| s.to_string()).collect()
}

fn default_system_fields() -> Vec<String> {
    DEFAULT_SYSTEM_FIELDS.iter().map(|s| s.to_string()).collect()
}
