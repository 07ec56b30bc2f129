//! Timeout configuration for drill-link operations.
//!
//! Every operation is a single blocking request, so a timeout is the only
//! way a call ends early. A timeout surfaces as [`DrillLinkError::RequestError`].
//!
//! [`DrillLinkError::RequestError`]: crate::DrillLinkError::RequestError

use std::time::Duration;

/// Timeout configuration for drill-link operations.
///
/// # Examples
///
/// ```rust
/// use drill_link::DrillLinkTimeouts;
/// use std::time::Duration;
///
/// // Defaults: 10s login, 120s queries
/// let timeouts = DrillLinkTimeouts::default();
///
/// // Longer queries for a slow cluster
/// let timeouts = DrillLinkTimeouts::builder()
///     .query_timeout(Duration::from_secs(600))
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for the form login request.
    /// Default: 10 seconds
    pub auth_timeout: Duration,

    /// Timeout for a single SQL query round trip.
    /// Default: 120 seconds
    pub query_timeout: Duration,
}

impl Default for DrillLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            auth_timeout: Duration::from_secs(10),
            query_timeout: Duration::from_secs(120),
        }
    }
}

impl DrillLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> DrillLinkTimeoutsBuilder {
        DrillLinkTimeoutsBuilder::new()
    }
}

/// Builder for creating custom [`DrillLinkTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct DrillLinkTimeoutsBuilder {
    timeouts: DrillLinkTimeouts,
}

impl DrillLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: DrillLinkTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    /// Set the login timeout.
    pub fn auth_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.auth_timeout = timeout;
        self
    }

    /// Set the login timeout in seconds.
    pub fn auth_timeout_secs(self, secs: u64) -> Self {
        self.auth_timeout(Duration::from_secs(secs))
    }

    /// Set the query timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.query_timeout = timeout;
        self
    }

    /// Set the query timeout in seconds.
    pub fn query_timeout_secs(self, secs: u64) -> Self {
        self.query_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> DrillLinkTimeouts {
        self.timeouts
    }
}
