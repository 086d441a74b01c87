// Derives stable lookup keys for cached AI responses.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

// Domain separation so keys for different request kinds never collide.
const CACHE_DOMAIN: &[u8] = b"PROPSEARCH-CACHE";

/// Sorts a JSON object's keys recursively for canonical serialization.
///
/// `serde_json::Map` is already key-ordered by default, but any crate in the
/// build enabling serde_json's `preserve_order` feature turns it into an
/// insertion-ordered map; this keeps cache keys stable either way.
fn sort_json_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted_map: BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), sort_json_value(v)))
                .collect();
            Value::Object(sorted_map.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_json_value).collect()),
        _ => value.clone(),
    }
}

/// Hex SHA-256 of raw bytes (e.g. a decoded image).
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Builds a cache key of the form `<kind>:<hex digest>` for the given inputs.
pub fn cache_key(kind: &str, inputs: &Value) -> String {
    let canonical_string = sort_json_value(inputs).to_string();
    let mut hasher = Sha256::new();
    hasher.update(CACHE_DOMAIN);
    hasher.update(kind.as_bytes());
    hasher.update([0u8]);
    hasher.update(canonical_string.as_bytes());
    format!("{}:{}", kind, hex::encode(hasher.finalize()))
}
