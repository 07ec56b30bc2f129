//! Client configuration loaded from TOML.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! hostname = "drill.internal"   # Engine host (required)
//! port = 8047                   # Web server port
//! accept_invalid_certs = true   # Skip TLS verification (self-signed certs)
//!
//! [auth]
//! username = "analyst"
//! password = "secret"
//!
//! [timeouts]
//! connection_secs = 10
//! auth_secs = 10
//! query_secs = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    client::DrillClientBuilder,
    error::{DrillLinkError, Result},
    session::DEFAULT_PORT,
    timeouts::DrillLinkTimeouts,
    DrillClient,
};

/// Client configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillLinkConfig {
    /// Server connection settings
    pub server: ServerConfig,

    /// Form-login credentials
    pub auth: Option<AuthConfig>,

    /// Timeout overrides
    pub timeouts: Option<TimeoutsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Engine host name, without scheme or port
    pub hostname: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_connection_secs")]
    pub connection_secs: u64,

    #[serde(default = "default_auth_secs")]
    pub auth_secs: u64,

    #[serde(default = "default_query_secs")]
    pub query_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_connection_secs() -> u64 {
    10
}

fn default_auth_secs() -> u64 {
    10
}

fn default_query_secs() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: default_port(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl DrillLinkConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DrillLinkConfig = toml::from_str(contents)?;
        if config.server.hostname.trim().is_empty() {
            return Err(DrillLinkError::ConfigurationError(
                "server.hostname must not be empty".into(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DrillLinkError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn resolved_timeouts(&self) -> DrillLinkTimeouts {
        match &self.timeouts {
            Some(t) => DrillLinkTimeouts::builder()
                .connection_timeout_secs(t.connection_secs)
                .auth_timeout_secs(t.auth_secs)
                .query_timeout_secs(t.query_secs)
                .build(),
            None => DrillLinkTimeouts::default(),
        }
    }

    /// Builder preloaded with every setting from this configuration.
    pub fn to_builder(&self) -> DrillClientBuilder {
        let mut builder = DrillClient::builder()
            .hostname(self.server.hostname.clone())
            .port(self.server.port)
            .accept_invalid_certs(self.server.accept_invalid_certs)
            .timeouts(self.resolved_timeouts());

        if let Some(auth) = &self.auth {
            builder = builder.credentials(auth.username.clone(), auth.password.clone());
        }
        builder
    }
}
