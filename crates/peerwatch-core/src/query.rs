//! Query Builder: turns an operator-supplied peer identifier into an API filter.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Filter selecting a single BGP peer on the router.
///
/// Address and name filters are mutually exclusive. Which one is used is
/// decided by [`build_filter`], never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryFilter {
    /// Match on the peer's `remote-address` attribute.
    RemoteAddress(IpAddr),
    /// Match on the peer's configured `name`.
    Name(String),
}

impl QueryFilter {
    /// Attribute name the router filters on.
    pub fn key(&self) -> &'static str {
        match self {
            Self::RemoteAddress(_) => "remote-address",
            Self::Name(_) => "name",
        }
    }

    /// Filter value in the form sent to the router.
    ///
    /// Addresses use their canonical text form (lowercase, compressed IPv6).
    pub fn value(&self) -> String {
        match self {
            Self::RemoteAddress(addr) => addr.to_string(),
            Self::Name(name) => name.clone(),
        }
    }

    /// Query word understood by the management API, e.g. `?remote-address=10.0.0.1`.
    pub fn expression(&self) -> String {
        format!("?{}={}", self.key(), self.value())
    }

    /// Returns true if this filter matches on the remote address.
    pub fn is_address(&self) -> bool {
        matches!(self, Self::RemoteAddress(_))
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}

/// Build the API filter for a peer identifier.
///
/// The identifier is first parsed as a full IPv4 or IPv6 literal. Anything
/// that does not parse (masks, surrounding whitespace, hostnames) is used
/// verbatim as a peer name. Never fails.
pub fn build_filter(identifier: &str) -> QueryFilter {
    match identifier.parse::<IpAddr>() {
        Ok(addr) => QueryFilter::RemoteAddress(addr),
        Err(_) => QueryFilter::Name(identifier.to_string()),
    }
}
