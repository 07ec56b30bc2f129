#![allow(dead_code)]
//! Shared helpers for drill-link integration tests.
//!
//! [`MockTransport`] replays scripted responses in order and records every
//! request, so tests can assert URLs, bodies and call counts without a
//! running engine.

use drill_link::{ClientLogger, DrillClient, DrillLinkError, HttpResponse, Result, Transport};
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

pub const HOST: &str = "drill.test";

static INIT_LOGGER: Once = Once::new();

pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .is_test(true)
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Form {
        url: String,
        fields: Vec<(String, String)>,
        timeout: Duration,
    },
    Json {
        url: String,
        body: JsonValue,
        timeout: Duration,
    },
}

impl Recorded {
    pub fn url(&self) -> &str {
        match self {
            Recorded::Form { url, .. } | Recorded::Json { url, .. } => url,
        }
    }

    /// SQL text of a recorded query request.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Recorded::Json { body, .. } => body.get("query").and_then(JsonValue::as_str),
            Recorded::Form { .. } => None,
        }
    }
}

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: Result<HttpResponse>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn push_ok(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub fn push_json(&self, body: JsonValue) -> &Self {
        self.push_ok(200, body.to_string())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// SQL of every query sent, in order.
    pub fn issued_sql(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.sql().map(str::to_string))
            .collect()
    }

    fn next(&self) -> Result<HttpResponse> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DrillLinkError::RequestError("no scripted response".into())))
    }
}

impl Transport for MockTransport {
    fn post_form(&self, url: &str, fields: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(Recorded::Form {
            url: url.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout,
        });
        self.next()
    }

    fn post_json(&self, url: &str, body: &JsonValue, timeout: Duration) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(Recorded::Json {
            url: url.to_string(),
            body: body.clone(),
            timeout,
        });
        self.next()
    }
}

/// Captures logger events as `LEVEL message` lines.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn has(&self, level: &str, fragment: &str) -> bool {
        self.events()
            .iter()
            .any(|e| e.starts_with(level) && e.contains(fragment))
    }
}

impl ClientLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.events.lock().unwrap().push(format!("INFO {}", message));
    }

    fn warn(&self, message: &str) {
        self.events.lock().unwrap().push(format!("WARN {}", message));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(format!("ERROR {}", message));
    }
}

/// Client whose login succeeds, with the mock ready for query responses.
pub fn logged_in_client() -> (DrillClient, Arc<MockTransport>, Arc<RecordingLogger>) {
    init_logging();
    let transport = MockTransport::new();
    transport.push_ok(200, "");
    let logger = Arc::new(RecordingLogger::default());
    let client = DrillClient::builder()
        .hostname(HOST)
        .credentials("analyst", "secret")
        .transport(transport.clone())
        .logger(logger.clone())
        .build()
        .expect("client should build");
    (client, transport, logger)
}
