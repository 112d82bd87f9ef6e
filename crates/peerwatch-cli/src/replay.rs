//! Offline transport answering API queries from a recorded JSON file.
//!
//! Recording format:
//!
//! ```json
//! {
//!   "user": "monitor",
//!   "password": "secret",
//!   "responses": {
//!     "?remote-address=10.0.0.1": { "*1": { "state": "established", "...": "..." } }
//!   }
//! }
//! ```
//!
//! Credentials are optional; when present, logins must match them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use peerwatch_core::{ApiTransport, ConnectionConfig, TransportError};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct Recording {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    responses: HashMap<String, Value>,
}

/// [`ApiTransport`] replaying recorded router replies.
pub struct ReplayTransport {
    endpoint: String,
    recording: Recording,
    authenticated: bool,
}

impl ReplayTransport {
    /// Load a recording, reporting failures as connection errors for `config`'s endpoint.
    pub fn load(path: &Path, config: &ConnectionConfig) -> Result<Self, TransportError> {
        let endpoint = config.endpoint();
        let unreachable = |reason: String| TransportError::Connection {
            endpoint: endpoint.clone(),
            reason,
        };

        let text = fs::read_to_string(path)
            .map_err(|e| unreachable(format!("cannot read {}: {}", path.display(), e)))?;
        let recording: Recording = serde_json::from_str(&text)
            .map_err(|e| unreachable(format!("invalid recording {}: {}", path.display(), e)))?;

        debug!(
            "Loaded {} recorded responses for {} from {}",
            recording.responses.len(),
            endpoint,
            path.display()
        );

        Ok(Self {
            endpoint,
            recording,
            authenticated: false,
        })
    }
}

impl ApiTransport for ReplayTransport {
    fn authenticate(&mut self, user: &str, password: &str) -> Result<(), TransportError> {
        let user_ok = self.recording.user.as_deref().map_or(true, |u| u == user);
        let password_ok = self.recording.password.as_deref().map_or(true, |p| p == password);
        if !(user_ok && password_ok) {
            return Err(TransportError::Authentication {
                user: user.to_string(),
            });
        }

        debug!("Logged in to {} as {}", self.endpoint, user);
        self.authenticated = true;
        Ok(())
    }

    fn fetch(&mut self, command: &str, filter: &str) -> Result<Value, TransportError> {
        if !self.authenticated {
            return Err(TransportError::Protocol(format!(
                "{} issued before login",
                command
            )));
        }

        debug!("Replaying {} {}", command, filter);
        Ok(self
            .recording
            .responses
            .get(filter)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}
