//! Peer records as returned by the router's management API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Session state key.
pub const STATE: &str = "state";
/// Remote peer address key.
pub const REMOTE_ADDRESS: &str = "remote-address";
/// Remote autonomous system number key.
pub const REMOTE_AS: &str = "remote-as";
/// Session uptime key.
pub const UPTIME: &str = "uptime";
/// Administrative shutdown flag key.
pub const DISABLED: &str = "disabled";

/// Session state reported for an up BGP session.
pub const ESTABLISHED: &str = "established";

/// Flat string-keyed attributes of one BGP peer.
///
/// The transport enforces no schema, so every lookup is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerRecord {
    fields: BTreeMap<String, String>,
}

impl PeerRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns true if the peer is administratively disabled.
    ///
    /// RouterOS reports booleans as `true`/`false` (older releases `yes`/`no`).
    /// An absent flag means enabled. Unlike a plain non-empty check, the
    /// text `false` or `no` is read as enabled.
    pub fn is_disabled(&self) -> bool {
        self.get(DISABLED).is_some_and(|value| {
            value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
        })
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for PeerRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
