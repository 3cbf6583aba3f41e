//! MySQL row decoding into [`CellValue`]s.

use bigdecimal::ToPrimitive;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use requestor_core::{CellValue, Row};
use sqlx::mysql::MySqlRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// Convert a MySQL row, keeping column order.
pub fn row_from_mysql(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .map(|col| {
            let value = decode_cell(row, col.ordinal(), col.type_info().name());
            (col.name().to_string(), value)
        })
        .collect()
}

/// How a column's declared type is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int,
    UInt,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Time,
    Json,
    Text,
    Bytes,
}

/// Map a MySQL type name (as reported by the driver) to a decode strategy.
pub fn cell_kind(type_name: &str) -> CellKind {
    let upper = type_name.to_ascii_uppercase();
    if upper.ends_with("UNSIGNED") {
        return CellKind::UInt;
    }
    match upper.as_str() {
        // TINYINT(1); kept numeric so exports match what the framework returns
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => CellKind::Int,
        "FLOAT" => CellKind::Float,
        "DOUBLE" => CellKind::Double,
        "DECIMAL" => CellKind::Decimal,
        "DATE" => CellKind::Date,
        "DATETIME" => CellKind::DateTime,
        "TIMESTAMP" => CellKind::Timestamp,
        "TIME" => CellKind::Time,
        "JSON" => CellKind::Json,
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => CellKind::Bytes,
        _ => CellKind::Text,
    }
}

fn decode_cell(row: &MySqlRow, idx: usize, type_name: &str) -> CellValue {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return CellValue::Null,
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(column = idx, error = %e, "Failed to read column");
            return CellValue::Null;
        }
    }

    let typed = match cell_kind(type_name) {
        CellKind::Int => row.try_get::<i64, _>(idx).ok().map(CellValue::Int),
        CellKind::UInt => row.try_get::<u64, _>(idx).ok().map(CellValue::UInt),
        CellKind::Float => row
            .try_get::<f32, _>(idx)
            .ok()
            .map(|v| CellValue::Float(v.into())),
        CellKind::Double => row.try_get::<f64, _>(idx).ok().map(CellValue::Float),
        CellKind::Decimal => row
            .try_get::<BigDecimal, _>(idx)
            .ok()
            .and_then(|d| d.to_f64())
            .map(CellValue::Float),
        CellKind::Date => row.try_get::<NaiveDate, _>(idx).ok().map(CellValue::Date),
        CellKind::DateTime => row
            .try_get::<NaiveDateTime, _>(idx)
            .ok()
            .map(CellValue::DateTime),
        CellKind::Timestamp => row
            .try_get::<DateTime<Utc>, _>(idx)
            .ok()
            .map(CellValue::Timestamp),
        CellKind::Time => row.try_get::<NaiveTime, _>(idx).ok().map(CellValue::Time),
        CellKind::Json => row
            .try_get::<serde_json::Value, _>(idx)
            .ok()
            .map(CellValue::Json),
        CellKind::Text => row.try_get::<String, _>(idx).ok().map(CellValue::Text),
        CellKind::Bytes => row.try_get::<Vec<u8>, _>(idx).ok().map(CellValue::Bytes),
    };

    typed
        .or_else(|| row.try_get::<String, _>(idx).ok().map(CellValue::Text))
        .or_else(|| row.try_get::<Vec<u8>, _>(idx).ok().map(CellValue::Bytes))
        .unwrap_or_else(|| {
            tracing::warn!(column = idx, type_name, "Unsupported column type, treating as null");
            CellValue::Null
        })
}
