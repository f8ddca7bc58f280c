//! Canonical JSON encoding.
//!
//! Every party re-executes the same transaction and the ledger compares the
//! resulting bytes, so encoding must be a pure function of logical content:
//! object keys are sorted recursively and no whitespace is emitted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ContractError;
use crate::record::VotingRecord;

/// Encode any serializable value into canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let value = serde_json::to_value(value).map_err(|e| ContractError::Encode(e.to_string()))?;
    serde_json::to_vec(&sort_keys(value)).map_err(|e| ContractError::Encode(e.to_string()))
}

/// Decode and validate a record read from `key`.
pub fn decode_record(key: &str, bytes: &[u8]) -> Result<VotingRecord, ContractError> {
    let record: VotingRecord =
        serde_json::from_slice(bytes).map_err(|e| ContractError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    record.validate(key).map_err(|reason| ContractError::Corrupt {
        key: key.to_string(),
        reason,
    })?;
    Ok(record)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
