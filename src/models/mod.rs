//! Data models for drill-link.
//!
//! Wire payloads for the `/query.json` endpoint and the typed table the
//! client hands back to callers.

pub mod cell_value;
pub mod query_request;
pub mod query_response;
pub mod table;


pub use cell_value::CellValue;
pub use query_request::QueryRequest;
pub use query_response::QueryResponse;
pub use table::{CatalogEntry, Table};
