//! Form-login session against the query engine.
//!
//! A [`Session`] is created once per client. Login happens exactly once at
//! construction; a failed login leaves the session permanently invalid and
//! nothing retries it.

use crate::{
    error::DrillLinkError,
    logger::ClientLogger,
    transport::Transport,
};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Port the engine's web server listens on.
pub const DEFAULT_PORT: u16 = 8047;

const LOGIN_PATH: &str = "/j_security_check";

/// Authentication state of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Login succeeded; the transport holds the session cookie.
    Authenticated,
    /// Login failed with the recorded reason.
    Invalid(DrillLinkError),
}

/// Authenticated HTTP session.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    transport: Arc<dyn Transport>,
    state: SessionState,
}

impl Session {
    /// Log in with `j_username` / `j_password` against `https://{hostname}:{port}`.
    ///
    /// Never fails: transport errors and non-2xx statuses are recorded as
    /// [`SessionState::Invalid`] and reported through `logger`.
    pub fn authenticate(
        hostname: &str,
        port: u16,
        username: &str,
        password: &str,
        transport: Arc<dyn Transport>,
        timeout: Duration,
        logger: &dyn ClientLogger,
    ) -> Self {
        let base_url = base_url(hostname, port);
        let login_url = format!("{}{}", base_url, LOGIN_PATH);

        logger.info(&format!("Attempting connection to {}...", hostname));
        debug!("[DRILL_LOGIN] Authenticating user '{}' at url={}", username, login_url);

        let fields = [("j_username", username), ("j_password", password)];
        let outcome = match transport.post_form(&login_url, &fields, timeout) {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(format!("HTTP {}: {}", response.status, response.body)),
            Err(e) => Err(e.to_string()),
        };

        let state = match outcome {
            Ok(()) => {
                logger.info("Authentication successful.");
                SessionState::Authenticated
            },
            Err(reason) => {
                logger.error(&format!("Authentication failed for {}: {}", username, reason));
                SessionState::Invalid(DrillLinkError::AuthenticationFailed(reason))
            },
        };

        Self {
            base_url,
            transport,
            state,
        }
    }

    /// A session that never logged in, e.g. because the transport could not be built.
    pub fn invalid(
        hostname: &str,
        port: u16,
        transport: Arc<dyn Transport>,
        reason: DrillLinkError,
    ) -> Self {
        Self {
            base_url: base_url(hostname, port),
            transport,
            state: SessionState::Invalid(reason),
        }
    }

    /// True when login succeeded.
    pub fn is_valid(&self) -> bool {
        matches!(self.state, SessionState::Authenticated)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("state", &self.state)
            .finish()
    }
}

fn base_url(hostname: &str, port: u16) -> String {
    format!("https://{}:{}", hostname, port)
}
