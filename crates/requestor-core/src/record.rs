//! Row values and exported records.
//!
//! Database rows arrive as ordered `(column, CellValue)` pairs. Before they
//! are sent anywhere they are turned into JSON records: null cells are
//! dropped, dates and times become ISO-8601 strings, and a record with no
//! remaining fields is discarded.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A JSON object holding one exported row.
pub type Record = Map<String, Value>;

/// A typed value decoded from a database cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(Value),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Time(NaiveTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert to JSON. Temporal values use ISO-8601 text.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::UInt(u) => Value::from(*u),
            CellValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            CellValue::Json(v) => v.clone(),
            CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            CellValue::DateTime(dt) => Value::String(iso_datetime(dt)),
            CellValue::Timestamp(ts) => {
                Value::String(format!("{}+00:00", iso_datetime(&ts.naive_utc())))
            }
            CellValue::Time(t) => Value::String(iso_time(t)),
        }
    }
}

fn iso_datetime(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn iso_time(t: &NaiveTime) -> String {
    if t.nanosecond() == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        t.format("%H:%M:%S%.6f").to_string()
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        CellValue::UInt(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::Timestamp(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// One database row: column names paired with values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.push((column.into(), value.into()));
    }

    /// Builder form of [`Row::push`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keep only the named columns, in the row's own order.
    pub fn project(self, columns: &[String]) -> Row {
        Row {
            fields: self
                .fields
                .into_iter()
                .filter(|(name, _)| columns.iter().any(|c| c == name))
                .collect(),
        }
    }

    /// Export form: nulls dropped, `None` if nothing is left.
    pub fn into_record(self) -> Option<Record> {
        let record: Record = self
            .fields
            .into_iter()
            .filter_map(|(name, value)| {
                let json = value.to_json();
                (!json.is_null()).then_some((name, json))
            })
            .collect();
        (!record.is_empty()).then_some(record)
    }

    /// Raw form: every column kept, nulls included.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<S: Into<String>> FromIterator<(S, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, CellValue)>>(iter: I) -> Self {
        Row {
            fields: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

/// Filtered records for one table. Never contains an empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordBatch(Vec<Record>);

impl RecordBatch {
    /// Filter rows into records, dropping rows that end up empty.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self(rows.into_iter().filter_map(Row::into_record).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
