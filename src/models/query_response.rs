use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Successful response body of `POST /query.json`.
///
/// `columns` and `metadata` are positionally aligned: `metadata[i]` is the
/// declared type of `columns[i]`. Rows are keyed by column name and may omit
/// columns whose value is null.
///
/// # Example (JSON representation)
///
/// ```json
/// {
///   "columns": ["ID", "CREATED"],
///   "metadata": ["INTEGER", "TIMESTAMP"],
///   "rows": [{"ID": 1, "CREATED": "1577836800000"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub metadata: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Map<String, JsonValue>>,
}

impl QueryResponse {
    /// Column name -> declared type, zipped by position.
    ///
    /// Extra entries on either side are ignored. A repeated column name
    /// keeps the last declared type.
    pub fn declared_types(&self) -> HashMap<&str, &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.metadata.iter().map(String::as_str))
            .collect()
    }
}

/// True when a declared type carries epoch-millisecond values.
pub fn is_temporal_type(declared: &str) -> bool {
    matches!(
        declared.to_ascii_uppercase().as_str(),
        "DATE" | "TIME" | "TIMESTAMP"
    )
}
