//! Canonical JSON bytes and content digests for search traces.
//!
//! Canonical form is compact `serde_json` output with object keys in byte
//! order and integer-only numbers. Floats are rejected; callers encode them
//! with [`f64_hex`] so output is bit-exact across platforms.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },

    /// `serde_json` could not write the value.
    #[error("canonical JSON serialization failed: {detail}")]
    Serialize { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any JSON number is not
/// representable as `i64` or `u64`, and [`CanonError::Serialize`] if
/// `serde_json` fails to write the result.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let sorted = canonicalize(value)?;
    serde_json::to_vec(&sorted).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

/// SHA-256 over `domain || data`, formatted as `"sha256:<hex>"`.
///
/// Domain prefixes are null-terminated so no prefix is a prefix of another.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Bit-exact text form of a float: big-endian IEEE-754 bytes as hex.
#[must_use]
pub fn f64_hex(value: f64) -> String {
    hex::encode(value.to_be_bytes())
}

/// Copy `value` with every object rebuilt in sorted key order, rejecting
/// non-integer numbers.
fn canonicalize(value: &Value) -> Result<Value, CanonError> {
    Ok(match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => value.clone(),
        Value::Number(n) => return Err(CanonError::NonIntegerNumber { raw: n.to_string() }),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(canonicalize)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), canonicalize(&map[key])?);
            }
            Value::Object(out)
        }
        Value::Null | Value::Bool(_) | Value::String(_) => value.clone(),
    })
}
