//! # Peerwatch Core
//!
//! BGP peer resolution and status classification for monitoring probes.
//! Given an API transport and a peer identifier, produces one of the
//! monitoring-plugin verdicts `OK`, `WARNING`, `CRITICAL` or `UNKNOWN`.
//!
//! ## Pipeline
//!
//! | Stage | Module | Failure mode |
//! |-------|--------|--------------|
//! | Query Builder | [`build_filter`] | none, any string is a valid name |
//! | Fetch | [`ApiTransport`] | transport error → `UNKNOWN` |
//! | Record Resolver | [`resolve`] | not configured / ambiguous / malformed → `UNKNOWN` |
//! | Status Classifier | [`classify`] | missing fields → `WARNING` or `UNKNOWN` |
//!
//! ```text
//!  peer identifier
//!        │
//!        ▼
//!  ┌─────────────┐  ?remote-address=…   ┌──────────────┐
//!  │   Query     │ ───────────────────▶ │ ApiTransport │
//!  │   Builder   │      ?name=…         └──────┬───────┘
//!  └─────────────┘                             │ raw response
//!                                              ▼
//!  ┌─────────────┐     PeerRecord       ┌──────────────┐
//!  │   Status    │ ◀─────────────────── │   Record     │
//!  │ Classifier  │                      │   Resolver   │
//!  └──────┬──────┘                      └──────────────┘
//!         ▼
//!      Verdict
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use peerwatch_core::{check_peer, ConnectionConfig};
//!
//! let config = ConnectionConfig::new("192.0.2.1", "monitor", "secret");
//! let verdict = check_peer(&mut transport, &config, "10.0.0.1");
//! println!("{}", verdict);
//! std::process::exit(verdict.exit_code().into());
//! ```
//!
//! ## Notes
//!
//! - Each run is stateless and single-shot
//! - A peer identifier must match exactly one record
//! - Classification never fails; unresolved cases end as `UNKNOWN`

mod classify;
mod client;
mod config;
mod error;
mod query;
mod record;
mod resolve;
mod verdict;

pub use classify::classify;
pub use client::{check_peer, get_peer_details, ApiTransport, PEER_GETALL};
pub use config::{ConnectionConfig, API_PORT, API_TLS_PORT};
pub use error::{CheckError, TransportError};
pub use query::{build_filter, QueryFilter};
pub use record::{PeerRecord, DISABLED, ESTABLISHED, REMOTE_ADDRESS, REMOTE_AS, STATE, UPTIME};
pub use resolve::resolve;
pub use verdict::{Status, Verdict};

/// Core result type for peer resolution.
pub type Result<T> = std::result::Result<T, CheckError>;
