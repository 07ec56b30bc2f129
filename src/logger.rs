//! Injected event logging.
//!
//! The client reports login outcomes, query timings and decode warnings
//! through a [`ClientLogger`] handed to it at construction. Nothing here
//! installs a global logger.

use std::sync::Arc;

/// Sink for client-level events.
pub trait ClientLogger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every event. The default for new clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ClientLogger for NoopLogger {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards events to the `log` facade under the `drill_link` target.
///
/// ```rust,no_run
/// use drill_link::{DrillClient, LogCrateLogger};
/// use std::sync::Arc;
///
/// let client = DrillClient::builder()
///     .hostname("drill.internal")
///     .credentials("analyst", "secret")
///     .logger(Arc::new(LogCrateLogger))
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateLogger;

impl ClientLogger for LogCrateLogger {
    fn info(&self, message: &str) {
        log::info!(target: "drill_link", "{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!(target: "drill_link", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "drill_link", "{}", message);
    }
}

pub(crate) fn noop() -> Arc<dyn ClientLogger> {
    Arc::new(NoopLogger)
}
