//! Catalog introspection queries.
//!
//! Entity definitions live in the framework's `{prefix}DocType` table;
//! physical column metadata comes from `information_schema.columns` for the
//! current database.

use requestor_core::{CatalogConfig, ColumnDescriptor};
use sqlx::{MySqlPool, Row};

/// Column metadata for one physical table in the current database.
pub const COLUMNS_QUERY: &str = r#"
    SELECT CAST(column_name AS CHAR) AS column_name,
           CAST(data_type AS CHAR) AS data_type
    FROM information_schema.columns
    WHERE table_name = ?
      AND table_schema = DATABASE()
    ORDER BY ordinal_position
"#;

/// Quote an identifier with backticks, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Query listing candidate entity names. Binds one parameter per excluded
/// module, in `catalog.excluded_modules` order.
pub fn entities_query(catalog: &CatalogConfig) -> String {
    let mut sql = format!(
        "SELECT CAST(name AS CHAR) AS name FROM {} \
         WHERE issingle = 0 AND istable = 0 AND is_virtual = 0 AND custom = 0",
        quote_ident(&catalog.storage_name("DocType"))
    );

    if !catalog.excluded_modules.is_empty() {
        let placeholders = vec!["?"; catalog.excluded_modules.len()].join(", ");
        sql.push_str(&format!(" AND module NOT IN ({})", placeholders));
    }

    sql.push_str(" ORDER BY name");
    sql
}

/// `SELECT` of the given columns from a whole table.
pub fn select_query(storage_name: &str, columns: &[String]) -> String {
    let cols = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {} FROM {}", cols, quote_ident(storage_name))
}

pub async fn list_entities(
    pool: &MySqlPool,
    catalog: &CatalogConfig,
) -> anyhow::Result<Vec<String>> {
    let sql = entities_query(catalog);
    let mut query = sqlx::query(&sql);
    for module in &catalog.excluded_modules {
        query = query.bind(module.as_str());
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter()
        .map(|r| r.try_get::<String, _>("name").map_err(Into::into))
        .collect()
}

pub async fn table_columns(
    pool: &MySqlPool,
    storage_name: &str,
) -> anyhow::Result<Vec<ColumnDescriptor>> {
    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(storage_name)
        .fetch_all(pool)
        .await?;

    let mut columns = Vec::with_capacity(rows.len());
    for r in rows {
        let name: String = r.try_get("column_name")?;
        let data_type: String = r.try_get("data_type")?;
        columns.push(ColumnDescriptor::new(name, data_type));
    }
    Ok(columns)
}
