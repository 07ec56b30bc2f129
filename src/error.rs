//! Error types for drill-link.

use thiserror::Error;

/// Result type for drill-link operations
pub type Result<T> = std::result::Result<T, DrillLinkError>;

/// Errors that can occur while talking to the query engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrillLinkError {
    /// Login request failed (network error or non-2xx status)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Operation attempted on a session whose login failed
    #[error("No active session")]
    NoSession,

    /// Transport failure: timeout, connection refused, unreadable body
    #[error("Request error: {0}")]
    RequestError(String),

    /// Engine answered with a non-200 status
    #[error("Query failed ({status_code}): {message}")]
    QueryFailed { status_code: u16, message: String },

    /// A single cell could not be decoded as epoch milliseconds
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl DrillLinkError {
    /// Short, stable name of the failure kind (useful for metrics and tests).
    pub fn kind(&self) -> &'static str {
        match self {
            DrillLinkError::AuthenticationFailed(_) => "AuthenticationFailed",
            DrillLinkError::NoSession => "NoSession",
            DrillLinkError::RequestError(_) => "RequestError",
            DrillLinkError::QueryFailed { .. } => "QueryFailed",
            DrillLinkError::TimestampOutOfRange(_) => "TimestampOutOfRange",
            DrillLinkError::ConfigurationError(_) => "ConfigurationError",
        }
    }
}

impl From<reqwest::Error> for DrillLinkError {
    fn from(err: reqwest::Error) -> Self {
        DrillLinkError::RequestError(err.to_string())
    }
}

impl From<serde_json::Error> for DrillLinkError {
    fn from(err: serde_json::Error) -> Self {
        DrillLinkError::RequestError(format!("Malformed response body: {}", err))
    }
}

impl From<toml::de::Error> for DrillLinkError {
    fn from(err: toml::de::Error) -> Self {
        DrillLinkError::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for DrillLinkError {
    fn from(err: std::io::Error) -> Self {
        DrillLinkError::ConfigurationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DrillLinkError::QueryFailed {
            status_code: 500,
            message: "PARSE ERROR".to_string(),
        };
        assert_eq!(err.to_string(), "Query failed (500): PARSE ERROR");
        assert_eq!(DrillLinkError::NoSession.to_string(), "No active session");
    }

    #[test]
    fn test_serde_error_maps_to_request_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DrillLinkError = parse_err.into();
        assert_eq!(err.kind(), "RequestError");
    }
}
