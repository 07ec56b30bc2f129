//! Main drill-link client with builder pattern.
//!
//! Provides the primary interface for connecting to a query engine and
//! running SQL, plus the catalog conveniences built on top of it.

use crate::{
    catalog::{self, SqlExecutor},
    config::DrillLinkConfig,
    error::{DrillLinkError, Result},
    logger::{self, ClientLogger},
    models::{CatalogEntry, Table},
    query::QueryExecutor,
    session::{Session, DEFAULT_PORT},
    timeouts::DrillLinkTimeouts,
    transport::{ReqwestTransport, Transport},
};
use std::sync::Arc;

/// Main drill-link client.
///
/// Construction logs in once. A failed login does not fail construction:
/// the client is returned with an invalid session, and every query on it
/// fails fast with [`DrillLinkError::NoSession`].
///
/// # Examples
///
/// ```rust,no_run
/// use drill_link::DrillClient;
///
/// let client = DrillClient::connect("drill.internal", "analyst", "secret");
///
/// for schema in client.list_schemas() {
///     println!("{}", schema);
/// }
///
/// match client.execute("SELECT * FROM cp.`employee.json` LIMIT 3") {
///     Ok(table) => println!("{} rows", table.row_count()),
///     Err(e) => eprintln!("query failed: {}", e),
/// }
/// ```
#[derive(Clone)]
pub struct DrillClient {
    hostname: String,
    session: Session,
    query_executor: QueryExecutor,
    logger: Arc<dyn ClientLogger>,
    timeouts: DrillLinkTimeouts,
}

impl DrillClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> DrillClientBuilder {
        DrillClientBuilder::new()
    }

    /// Log in to `https://{hostname}:8047` with default settings.
    ///
    /// Always returns a client; check [`DrillClient::is_authenticated`] or
    /// the result of the first query to learn whether login worked.
    pub fn connect(hostname: &str, username: &str, password: &str) -> Self {
        let builder = Self::builder()
            .hostname(hostname)
            .credentials(username, password);
        match builder.build() {
            Ok(client) => client,
            Err(e) => Self::unauthenticated(hostname, DEFAULT_PORT, DrillLinkTimeouts::default(), e),
        }
    }

    /// Build a client from a loaded configuration file.
    pub fn from_config(config: &DrillLinkConfig) -> Result<Self> {
        config.to_builder().build()
    }

    fn unauthenticated(
        hostname: &str,
        port: u16,
        timeouts: DrillLinkTimeouts,
        reason: DrillLinkError,
    ) -> Self {
        let logger = logger::noop();
        let transport: Arc<dyn Transport> = Arc::new(UnavailableTransport(reason.clone()));
        Self {
            hostname: hostname.to_string(),
            session: Session::invalid(hostname, port, transport, reason),
            query_executor: QueryExecutor::new(timeouts.query_timeout, logger.clone()),
            logger,
            timeouts,
        }
    }

    /// Execute a SQL statement and return the typed result table.
    pub fn execute(&self, sql: &str) -> Result<Table> {
        self.query_executor.execute(&self.session, sql)
    }

    /// Like [`DrillClient::execute`], but failures become `None` (already logged).
    pub fn execute_or_none(&self, sql: &str) -> Option<Table> {
        self.execute(sql).ok()
    }

    /// All schema names known to the engine, sorted by the engine.
    ///
    /// Returns an empty list when the query fails.
    pub fn list_schemas(&self) -> Vec<String> {
        self.logger.info("Fetching storage schemas...");
        catalog::list_schemas(self)
    }

    /// Tables, views and files inside `schema` (e.g. `dfs.root`, `oracle.HR`).
    ///
    /// Returns an empty list when every attempted query fails.
    pub fn list_objects(&self, schema: &str) -> Vec<CatalogEntry> {
        self.logger
            .info(&format!("Listing objects in schema: {}", schema));
        catalog::list_objects(self, schema)
    }

    /// True when the login at construction succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &DrillLinkTimeouts {
        &self.timeouts
    }
}

impl SqlExecutor for DrillClient {
    fn execute(&self, sql: &str) -> Result<Table> {
        DrillClient::execute(self, sql)
    }
}

impl std::fmt::Debug for DrillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrillClient")
            .field("hostname", &self.hostname)
            .field("session", &self.session)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Stands in for a transport that could not be constructed.
struct UnavailableTransport(DrillLinkError);

impl Transport for UnavailableTransport {
    fn post_form(
        &self,
        _url: &str,
        _fields: &[(&str, &str)],
        _timeout: std::time::Duration,
    ) -> Result<crate::transport::HttpResponse> {
        Err(self.0.clone())
    }

    fn post_json(
        &self,
        _url: &str,
        _body: &serde_json::Value,
        _timeout: std::time::Duration,
    ) -> Result<crate::transport::HttpResponse> {
        Err(self.0.clone())
    }
}

/// Builder for configuring [`DrillClient`] instances.
pub struct DrillClientBuilder {
    hostname: Option<String>,
    port: u16,
    username: String,
    password: String,
    timeouts: DrillLinkTimeouts,
    accept_invalid_certs: bool,
    logger: Arc<dyn ClientLogger>,
    transport: Option<Arc<dyn Transport>>,
}

impl DrillClientBuilder {
    fn new() -> Self {
        Self {
            hostname: None,
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            timeouts: DrillLinkTimeouts::default(),
            accept_invalid_certs: true,
            logger: logger::noop(),
            transport: None,
        }
    }

    /// Set the engine host name (required)
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the web server port (default 8047)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the form-login credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set timeout configuration for login and queries
    pub fn timeouts(mut self, timeouts: DrillLinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Skip TLS certificate verification (on by default for self-signed intranet hosts)
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the event logger (default: discard)
    pub fn logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the HTTP transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client and log in.
    ///
    /// Fails only on configuration problems; a rejected login yields a
    /// client with an invalid session.
    pub fn build(self) -> Result<DrillClient> {
        let hostname = self
            .hostname
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| DrillLinkError::ConfigurationError("hostname is required".into()))?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.timeouts.connection_timeout,
                self.accept_invalid_certs,
            )?),
        };

        let session = Session::authenticate(
            &hostname,
            self.port,
            &self.username,
            &self.password,
            transport,
            self.timeouts.auth_timeout,
            self.logger.as_ref(),
        );

        let query_executor = QueryExecutor::new(self.timeouts.query_timeout, self.logger.clone());

        Ok(DrillClient {
            hostname,
            session,
            query_executor,
            logger: self.logger,
            timeouts: self.timeouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_hostname() {
        let result = DrillClient::builder().credentials("u", "p").build();
        assert!(matches!(result, Err(DrillLinkError::ConfigurationError(_))));

        let result = DrillClient::builder().hostname("  ").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_unauthenticated_client_fails_fast() {
        let client = DrillClient::unauthenticated(
            "nowhere",
            DEFAULT_PORT,
            DrillLinkTimeouts::default(),
            DrillLinkError::ConfigurationError("no tls backend".into()),
        );

        assert!(!client.is_authenticated());
        assert_eq!(client.base_url(), "https://nowhere:8047");
        assert_eq!(client.execute("SELECT 1").unwrap_err(), DrillLinkError::NoSession);
        assert!(client.list_schemas().is_empty());
        assert!(client.list_objects("dfs.tmp").is_empty());
    }
}
