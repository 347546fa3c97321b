//! crates/dh_io/src/hasher.rs
//!
//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Use `sha256_canonical(..)` for JSON **values/structs** (goes through canonical_json).
//! - Use `sha256_hex(..)` for **raw bytes** (input files are hashed as read).
//! - Hex digests are **lowercase**.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// `"RES:" + sha256(canonical(value))`.
pub fn result_id<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(format!("RES:{}", sha256_canonical(value)?))
}

/// True for a lowercase 64-hex digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = sha256_canonical(&json!({"a": 1, "b": [1, 2]})).unwrap();
        let b = sha256_canonical(&json!({"b": [1, 2], "a": 1})).unwrap();
        assert_eq!(a, b);
        assert!(is_sha256_hex(&a));
        let c = sha256_canonical(&json!({"b": [2, 1], "a": 1})).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn result_id_prefix() {
        let id = result_id(&json!({"x": 1})).unwrap();
        assert!(id.starts_with("RES:"));
        assert!(is_sha256_hex(&id[4..]));
    }
}
