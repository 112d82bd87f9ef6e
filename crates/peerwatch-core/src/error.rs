//! Error types for peer resolution.

use thiserror::Error;

/// Failures raised by an [`ApiTransport`](crate::ApiTransport).
///
/// These are never retried. The probe reports them verbatim as `UNKNOWN`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The API endpoint could not be reached or the session dropped.
    #[error("connection to {endpoint} failed: {reason}")]
    Connection {
        /// `host:port` of the API endpoint.
        endpoint: String,
        /// Underlying cause.
        reason: String,
    },

    /// The router rejected the credentials.
    #[error("authentication failed for user '{user}'")]
    Authentication {
        /// User the login was attempted with.
        user: String,
    },

    /// The router answered with something the transport could not decode.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No transport is available for the requested endpoint.
    #[error("no API transport available for {0}")]
    Unavailable(String),
}

/// Terminal failures while resolving a peer. All of them map to `UNKNOWN`.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Transport or authentication failure.
    #[error("API error: {0}")]
    Transport(#[from] TransportError),

    /// The filter matched no peer.
    #[error("Peer '{peer}' not configured")]
    NotConfigured {
        /// Filter value that was looked up.
        peer: String,
    },

    /// The filter matched more than one peer.
    #[error("API returned more than one record, cannot handle this")]
    AmbiguousResult {
        /// Number of entries in the response.
        count: usize,
    },

    /// The response was not a keyed collection of peer fields.
    #[error("API did not return dict, cannot handle this")]
    MalformedResponse {
        /// What was wrong with the response shape.
        detail: String,
    },
}
