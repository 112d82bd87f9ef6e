//! Record Resolver: validates that a raw API response holds exactly one peer.

use serde_json::{Map, Value};
use tracing::debug;

use crate::{error::CheckError, query::QueryFilter, record::PeerRecord, Result};

/// Reduce a raw `getall` response to the single peer record it must contain.
///
/// The response is expected to be a map from transport-assigned record ids to
/// field maps. The record id is discarded.
///
/// # Errors
///
/// - [`CheckError::NotConfigured`] if the response is empty
/// - [`CheckError::AmbiguousResult`] if it holds more than one entry
/// - [`CheckError::MalformedResponse`] if it is not a map of field maps
pub fn resolve(filter: &QueryFilter, response: &Value) -> Result<PeerRecord> {
    let count = entry_count(response);
    debug!("Response for {} holds {} entries", filter, count);

    if count == 0 {
        return Err(CheckError::NotConfigured {
            peer: filter.value(),
        });
    }
    if count > 1 {
        return Err(CheckError::AmbiguousResult { count });
    }

    let Value::Object(records) = response else {
        return Err(malformed(format!("expected a map of records, got {}", kind(response))));
    };
    let Some((id, fields)) = records.iter().next() else {
        return Err(malformed("record map emptied during resolution".to_string()));
    };
    let Value::Object(fields) = fields else {
        return Err(malformed(format!("record {} is {}, not a map", id, kind(fields))));
    };

    let record = to_record(fields)?;
    debug!(
        "Resolved {} to record {}: {:?}",
        filter,
        id,
        record.iter().collect::<Vec<_>>()
    );
    Ok(record)
}

/// Number of entries in a response, with scalar falsy values counting as empty.
fn entry_count(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(false) => 0,
        Value::Bool(true) | Value::Number(_) => 1,
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
    }
}

fn to_record(fields: &Map<String, Value>) -> Result<PeerRecord> {
    let mut record = PeerRecord::new();
    for (key, value) in fields {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(malformed(format!("field '{}' is {}", key, kind(value))));
            }
        };
        record.insert(key.as_str(), text);
    }
    Ok(record)
}

fn malformed(detail: String) -> CheckError {
    debug!("Malformed response: {}", detail);
    CheckError::MalformedResponse { detail }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_filter;
    use serde_json::json;

    fn filter() -> QueryFilter {
        build_filter("10.0.0.1")
    }

    #[test]
    fn test_empty_responses_are_not_configured() {
        for response in [json!(null), json!({}), json!([]), json!(""), json!(false)] {
            match resolve(&filter(), &response) {
                Err(CheckError::NotConfigured { peer }) => assert_eq!(peer, "10.0.0.1"),
                other => panic!("expected NotConfigured for {}, got {:?}", response, other),
            }
        }
    }

    #[test]
    fn test_multiple_records_are_ambiguous() {
        let response = json!({
            "*1": {"state": "established"},
            "*2": {"state": "idle"}
        });
        assert!(matches!(
            resolve(&filter(), &response),
            Err(CheckError::AmbiguousResult { count: 2 })
        ));
    }

    #[test]
    fn test_ambiguity_checked_before_shape() {
        let response = json!([{"state": "idle"}, {"state": "idle"}]);
        assert!(matches!(
            resolve(&filter(), &response),
            Err(CheckError::AmbiguousResult { .. })
        ));
    }

    #[test]
    fn test_single_non_map_is_malformed() {
        for response in [json!([{"state": "idle"}]), json!("x"), json!(7), json!(true)] {
            assert!(
                matches!(resolve(&filter(), &response), Err(CheckError::MalformedResponse { .. })),
                "response {}",
                response
            );
        }
    }

    #[test]
    fn test_record_value_must_be_map() {
        let response = json!({"*1": "established"});
        assert!(matches!(
            resolve(&filter(), &response),
            Err(CheckError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_nested_field_is_malformed() {
        let response = json!({"*1": {"state": {"nested": true}}});
        assert!(matches!(
            resolve(&filter(), &response),
            Err(CheckError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_single_record_is_unwrapped() {
        let response = json!({
            "*A": {
                "state": "established",
                "remote-address": "10.0.0.1",
                "remote-as": 65001,
                "disabled": false,
                "comment": null
            }
        });
        let record = resolve(&filter(), &response).unwrap();
        assert_eq!(record.get("state"), Some("established"));
        assert_eq!(record.get("remote-as"), Some("65001"));
        assert_eq!(record.get("disabled"), Some("false"));
        assert_eq!(record.get("comment"), None);
        assert_eq!(record.get(".id"), None);
        assert_eq!(record.iter().count(), 4);
    }
}
