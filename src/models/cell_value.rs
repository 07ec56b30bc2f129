use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// A single value in a result [`Table`](super::Table).
///
/// Values arrive as raw JSON scalars. Columns with a temporal declared type
/// are decoded into [`CellValue::DateTime`] (or `Null` when undecodable).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Naive (zone-less) instant decoded from epoch milliseconds
    DateTime(NaiveDateTime),
    /// Arrays and objects, kept as-is
    Json(JsonValue),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

impl From<JsonValue> for CellValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(b),
            JsonValue::Number(n) => CellValue::Number(n),
            JsonValue::String(s) => CellValue::String(s),
            other => CellValue::Json(other),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            CellValue::Json(v) => write!(f, "{}", v),
        }
    }
}
