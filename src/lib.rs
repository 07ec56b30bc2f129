//! # drill-link
//!
//! Blocking client for SQL query engines that expose Apache Drill's REST
//! interface: a form login at `/j_security_check` followed by JSON queries
//! against `/query.json`.
//!
//! Results come back as a typed [`Table`]. Columns the engine declares as
//! `DATE`, `TIME` or `TIMESTAMP` are decoded from epoch milliseconds into
//! naive datetimes.
//!
//! ```rust,no_run
//! use drill_link::{DrillClient, LogCrateLogger};
//! use std::sync::Arc;
//!
//! # fn main() -> drill_link::Result<()> {
//! let client = DrillClient::builder()
//!     .hostname("drill.internal")
//!     .credentials("analyst", "secret")
//!     .logger(Arc::new(LogCrateLogger))
//!     .build()?;
//!
//! let table = client.execute("SELECT * FROM sys.version")?;
//! for record in table.rows_as_maps() {
//!     println!("{:?}", record);
//! }
//!
//! for entry in client.list_objects("dfs.tmp") {
//!     println!("{}", entry["NAME"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod query;
pub mod session;
pub mod timeouts;
pub mod timestamp;
pub mod transport;

pub use catalog::{PluginKind, SchemaPath, SqlExecutor};
pub use client::{DrillClient, DrillClientBuilder};
pub use config::DrillLinkConfig;
pub use error::{DrillLinkError, Result};
pub use logger::{ClientLogger, LogCrateLogger, NoopLogger};
pub use models::{CatalogEntry, CellValue, QueryRequest, QueryResponse, Table};
pub use query::QueryExecutor;
pub use session::{Session, SessionState, DEFAULT_PORT};
pub use timeouts::{DrillLinkTimeouts, DrillLinkTimeoutsBuilder};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
