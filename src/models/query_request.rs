use serde::{Deserialize, Serialize};

/// Request payload for SQL query execution.
///
/// # Examples
///
/// ```rust
/// use drill_link::models::QueryRequest;
///
/// let request = QueryRequest::sql("SELECT * FROM cp.`employee.json` LIMIT 5");
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["queryType"], "SQL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Query language; the client only ever sends `"SQL"`
    #[serde(rename = "queryType")]
    pub query_type: String,

    /// Raw SQL text, sent verbatim
    pub query: String,
}

impl QueryRequest {
    pub fn sql(query: impl Into<String>) -> Self {
        Self {
            query_type: "SQL".to_string(),
            query: query.into(),
        }
    }
}
