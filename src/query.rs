//! SQL query execution over `/query.json`.

use crate::{
    error::{DrillLinkError, Result},
    logger::ClientLogger,
    models::{query_response::is_temporal_type, QueryRequest, QueryResponse, Table},
    session::Session,
    timestamp::decode_cell,
};
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

const QUERY_PATH: &str = "/query.json";

/// Runs SQL against a [`Session`] and types the result.
#[derive(Clone)]
pub struct QueryExecutor {
    timeout: Duration,
    logger: Arc<dyn ClientLogger>,
}

impl QueryExecutor {
    pub fn new(timeout: Duration, logger: Arc<dyn ClientLogger>) -> Self {
        Self { timeout, logger }
    }

    /// Execute one SQL statement.
    ///
    /// Fails with [`DrillLinkError::NoSession`] without touching the network
    /// when the session is invalid, [`DrillLinkError::QueryFailed`] on any
    /// non-200 status, and [`DrillLinkError::RequestError`] on transport or
    /// body-parsing failures. A failed query leaves the session usable.
    pub fn execute(&self, session: &Session, sql: &str) -> Result<Table> {
        if !session.is_valid() {
            self.logger.error("No active session. Query aborted.");
            return Err(DrillLinkError::NoSession);
        }

        let sql_preview = if sql.chars().count() > 80 {
            format!("{}...", sql.chars().take(80).collect::<String>())
        } else {
            sql.to_string()
        };
        debug!(
            "[DRILL_QUERY] Starting query: \"{}\" (len={})",
            sql_preview.replace('\n', " "),
            sql.len()
        );

        let url = format!("{}{}", session.base_url(), QUERY_PATH);
        let body = serde_json::to_value(QueryRequest::sql(sql))?;

        let start = Instant::now();
        let sent = session.transport().post_json(&url, &body, self.timeout);
        let duration = round_secs(start.elapsed());

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                self.logger
                    .error(&format!("Request Exception during query: {}", e));
                return Err(e);
            },
        };

        if response.status != 200 {
            self.logger
                .error(&format!("Query Failed ({}s): {}", duration, response.body));
            return Err(DrillLinkError::QueryFailed {
                status_code: response.status,
                message: response.body,
            });
        }

        let parsed: QueryResponse = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                let err = DrillLinkError::from(e);
                self.logger
                    .error(&format!("Request Exception during query: {}", err));
                return Err(err);
            },
        };

        let row_count = parsed.rows.len();
        self.logger.info(&format!(
            "Query completed in {}s. Returned {} rows.",
            duration, row_count
        ));

        Ok(self.build_table(parsed))
    }

    /// Turn a parsed response into a table, decoding temporal columns.
    pub fn build_table(&self, mut response: QueryResponse) -> Table {
        let rows = std::mem::take(&mut response.rows);
        let mut table = Table::from_json_rows(rows);
        coerce_temporal_columns(&mut table, &response, self.logger.as_ref());
        table
    }
}

/// Decode every column whose declared type is DATE, TIME or TIMESTAMP.
///
/// Columns missing from the declared-type lookup pass through untouched.
/// Undecodable cells become `Null` and are logged as warnings.
pub fn coerce_temporal_columns(
    table: &mut Table,
    response: &QueryResponse,
    logger: &dyn ClientLogger,
) {
    let declared = response.declared_types();
    let temporal: Vec<usize> = table
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            declared
                .get(name.as_str())
                .is_some_and(|ty| is_temporal_type(ty))
        })
        .map(|(i, _)| i)
        .collect();

    for col in temporal {
        table.map_column(col, |raw| {
            let (value, err) = decode_cell(raw);
            if let Some(err) = err {
                logger.warn(&err.to_string());
            }
            value
        });
    }
}

fn round_secs(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
