//! Status Classifier: maps a resolved peer record onto a monitoring verdict.
//!
//! Session fields are mandatory once `state` is present. A disabled peer may
//! omit them, so a missing field falls back to the `disabled` flag before the
//! record is reported as unparseable.

use tracing::debug;

use crate::record::{PeerRecord, ESTABLISHED, REMOTE_ADDRESS, REMOTE_AS, STATE, UPTIME};
use crate::verdict::Verdict;

/// A mandatory field absent from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MissingField(&'static str);

/// Classify a peer record. Pure and infallible.
pub fn classify(record: &PeerRecord) -> Verdict {
    match session_verdict(record) {
        Ok(verdict) => verdict,
        Err(MissingField(key)) => {
            debug!("Peer record lacks '{}', disabled={}", key, record.is_disabled());
            if record.is_disabled() {
                disabled_verdict(record).unwrap_or_else(unparseable)
            } else {
                unparseable(MissingField(key))
            }
        }
    }
}

fn session_verdict(record: &PeerRecord) -> Result<Verdict, MissingField> {
    let state = require(record, STATE)?;
    let remote = require(record, REMOTE_ADDRESS)?;
    let remote_as = require(record, REMOTE_AS)?;

    if state != ESTABLISHED {
        return Ok(Verdict::critical(format!(
            "Session to {} ({}) in {} state",
            remote, remote_as, state
        )));
    }

    let uptime = require(record, UPTIME)?;
    Ok(Verdict::ok(format!(
        "Session to {} ({}) established for {}",
        remote, remote_as, uptime
    )))
}

// Address and AS are still required for a disabled peer; nothing is defaulted.
fn disabled_verdict(record: &PeerRecord) -> Result<Verdict, MissingField> {
    let remote = require(record, REMOTE_ADDRESS)?;
    let remote_as = require(record, REMOTE_AS)?;
    Ok(Verdict::warning(format!(
        "Session to {} (AS{}) disabled",
        remote, remote_as
    )))
}

fn unparseable(MissingField(key): MissingField) -> Verdict {
    Verdict::unknown(format!("Could not parse peer details: missing field '{}'", key))
}

fn require<'a>(record: &'a PeerRecord, key: &'static str) -> Result<&'a str, MissingField> {
    record.get(key).ok_or(MissingField(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Status;

    fn record(fields: &[(&str, &str)]) -> PeerRecord {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_established_is_ok() {
        let verdict = classify(&record(&[
            ("state", "established"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
            ("uptime", "3d"),
        ]));
        assert_eq!(verdict.status, Status::Ok);
        assert_eq!(verdict.message, "Session to 10.0.0.1 (65001) established for 3d");
    }

    #[test]
    fn test_other_state_is_critical() {
        let verdict = classify(&record(&[
            ("state", "connect"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Critical);
        assert_eq!(verdict.message, "Session to 10.0.0.1 (65001) in connect state");
    }

    #[test]
    fn test_state_comparison_is_exact() {
        let verdict = classify(&record(&[
            ("state", "Established"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
            ("uptime", "1h"),
        ]));
        assert_eq!(verdict.status, Status::Critical);
    }

    #[test]
    fn test_disabled_without_state_is_warning() {
        let verdict = classify(&record(&[
            ("disabled", "true"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Warning);
        assert_eq!(verdict.message, "Session to 10.0.0.1 (AS65001) disabled");
    }

    #[test]
    fn test_empty_record_is_unknown() {
        let verdict = classify(&PeerRecord::new());
        assert_eq!(verdict.status, Status::Unknown);
        assert_eq!(verdict.message, "Could not parse peer details: missing field 'state'");
    }

    #[test]
    fn test_disabled_false_is_not_warning() {
        let verdict = classify(&record(&[
            ("disabled", "false"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Unknown);
    }

    #[test]
    fn test_established_without_uptime_is_unknown() {
        let verdict = classify(&record(&[
            ("state", "established"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Unknown);
        assert!(verdict.message.contains("'uptime'"));
    }

    #[test]
    fn test_missing_address_with_state_is_unknown() {
        let verdict = classify(&record(&[("state", "idle"), ("remote-as", "65001")]));
        assert_eq!(verdict.status, Status::Unknown);
        assert!(verdict.message.contains("'remote-address'"));
    }

    #[test]
    fn test_disabled_established_peer_is_still_ok() {
        let verdict = classify(&record(&[
            ("state", "established"),
            ("disabled", "true"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
            ("uptime", "5m"),
        ]));
        assert_eq!(verdict.status, Status::Ok);
    }

    #[test]
    fn test_disabled_established_without_uptime_is_warning() {
        let verdict = classify(&record(&[
            ("state", "established"),
            ("disabled", "true"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Warning);
        assert_eq!(verdict.message, "Session to 10.0.0.1 (AS65001) disabled");
    }

    #[test]
    fn test_disabled_with_idle_state_is_critical() {
        let verdict = classify(&record(&[
            ("state", "idle"),
            ("disabled", "true"),
            ("remote-address", "10.0.0.1"),
            ("remote-as", "65001"),
        ]));
        assert_eq!(verdict.status, Status::Critical);
    }

    #[test]
    fn test_disabled_missing_as_is_unknown() {
        let verdict = classify(&record(&[("disabled", "yes"), ("remote-address", "10.0.0.1")]));
        assert_eq!(verdict.status, Status::Unknown);
        assert_eq!(verdict.message, "Could not parse peer details: missing field 'remote-as'");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let input = record(&[
            ("state", "active"),
            ("remote-address", "2001:db8::1"),
            ("remote-as", "64512"),
        ]);
        assert_eq!(classify(&input), classify(&input));
    }
}
