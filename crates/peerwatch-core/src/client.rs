//! Peer queries over an abstract management-API transport.
//!
//! The transport only knows how to log in and run a command. Peer lookup is
//! layered on top as free functions generic over [`ApiTransport`], so any
//! transport (plaintext, TLS, replay) gains it without subclassing.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    classify::classify,
    config::ConnectionConfig,
    error::TransportError,
    query::build_filter,
    record::PeerRecord,
    resolve::resolve,
    verdict::Verdict,
    Result,
};

/// API command listing BGP peers.
pub const PEER_GETALL: &str = "/routing/bgp/peer/getall";

/// Minimal capability the probe needs from a management-API client.
pub trait ApiTransport {
    /// Log in to the API.
    fn authenticate(&mut self, user: &str, password: &str) -> std::result::Result<(), TransportError>;

    /// Run `command` restricted by a query-word filter and return the raw reply.
    fn fetch(&mut self, command: &str, filter: &str) -> std::result::Result<Value, TransportError>;
}

impl<T: ApiTransport + ?Sized> ApiTransport for Box<T> {
    fn authenticate(&mut self, user: &str, password: &str) -> std::result::Result<(), TransportError> {
        (**self).authenticate(user, password)
    }

    fn fetch(&mut self, command: &str, filter: &str) -> std::result::Result<Value, TransportError> {
        (**self).fetch(command, filter)
    }
}

/// Look up a single BGP peer by remote address or name.
///
/// # Errors
///
/// Transport failures, or any resolution failure from [`resolve`].
pub fn get_peer_details<T: ApiTransport + ?Sized>(transport: &mut T, peer: &str) -> Result<PeerRecord> {
    let filter = build_filter(peer);
    debug!("Querying {} with {}", PEER_GETALL, filter.expression());

    let response = transport.fetch(PEER_GETALL, &filter.expression())?;
    resolve(&filter, &response)
}

/// Run one complete probe: log in, look up the peer and classify it.
///
/// Never fails; every error ends as an `UNKNOWN` verdict carrying its message.
pub fn check_peer<T: ApiTransport + ?Sized>(
    transport: &mut T,
    config: &ConnectionConfig,
    peer: &str,
) -> Verdict {
    debug!("Checking peer '{}' via {}", peer, config.endpoint());

    let details = transport
        .authenticate(&config.user, &config.password)
        .map_err(Into::into)
        .and_then(|()| get_peer_details(transport, peer));

    let verdict = match details {
        Ok(record) => classify(&record),
        Err(e) => {
            warn!("Peer '{}' could not be resolved: {}", peer, e);
            Verdict::unknown(e.to_string())
        }
    };

    info!("Peer '{}': {}", peer, verdict);
    verdict
}
