//! HTTP transport used by the session and query executor.
//!
//! [`Transport`] is the seam between the client and the network. The
//! production implementation is [`ReqwestTransport`]; tests plug in scripted
//! transports to observe the exact requests sent.

use crate::error::{DrillLinkError, Result};
use log::debug;
use std::time::{Duration, Instant};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking request/response transport.
///
/// Implementations keep whatever cookies the server sets so that a form
/// login is carried into later requests. Transport failures are reported as
/// [`DrillLinkError::RequestError`]; HTTP error statuses are *not* errors at
/// this layer.
pub trait Transport: Send + Sync {
    /// POST an `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse>;

    /// POST a JSON body.
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a blocking reqwest client with a cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport.
    ///
    /// `accept_invalid_certs` disables TLS certificate verification; query
    /// engines on intranets commonly run with self-signed certificates.
    pub fn new(connect_timeout: Duration, accept_invalid_certs: bool) -> Result<Self> {
        if accept_invalid_certs {
            debug!("[DRILL_HTTP] TLS certificate verification disabled");
        }

        let http_client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| DrillLinkError::ConfigurationError(e.to_string()))?;

        Ok(Self { http_client })
    }

    fn finish(
        &self,
        url: &str,
        started: Instant,
        response: reqwest::blocking::Response,
    ) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        debug!(
            "[DRILL_HTTP] Response received: url={} status={} duration_ms={}",
            url,
            status,
            started.elapsed().as_millis()
        );
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse> {
        debug!("[DRILL_HTTP] Sending form POST to {}", url);
        let started = Instant::now();
        let response = self
            .http_client
            .post(url)
            .form(fields)
            .timeout(timeout)
            .send()?;
        self.finish(url, started, response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        debug!("[DRILL_HTTP] Sending JSON POST to {}", url);
        let started = Instant::now();
        let response = self
            .http_client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()?;
        self.finish(url, started, response)
    }
}
