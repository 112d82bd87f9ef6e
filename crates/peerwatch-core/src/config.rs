//! Connection settings for the router's management API.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Default plaintext API port.
pub const API_PORT: u16 = 8728;

/// Default TLS API port.
pub const API_TLS_PORT: u16 = 8729;

/// Where and as whom the probe connects.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// IPv4/IPv6 address or hostname of the API endpoint.
    pub host: String,

    /// Explicit API port. Defaults depend on `tls`.
    #[serde(default)]
    pub port: Option<u16>,

    /// Connect with TLS.
    #[serde(default)]
    pub tls: bool,

    /// API user.
    pub user: String,

    /// API password.
    pub password: String,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Set an explicit port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable or disable TLS.
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Port actually used: the explicit one, else 8728 (plaintext) or 8729 (TLS).
    pub fn effective_port(&self) -> u16 {
        match (self.port, self.tls) {
            (Some(port), _) => port,
            (None, false) => API_PORT,
            (None, true) => API_TLS_PORT,
        }
    }

    /// `host:port`, with IPv6 hosts bracketed.
    pub fn endpoint(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(addr)) => format!("[{}]:{}", addr, self.effective_port()),
            _ => format!("{}:{}", self.host, self.effective_port()),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
