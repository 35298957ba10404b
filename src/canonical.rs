//! Canonical serialization for deterministic fingerprints.
//!
//! View models, facets and configs are fingerprinted so a build can tell
//! whether two runs over the same content produced the same pages.
//!
//! ## Determinism Guarantees
//!
//! - Struct fields serialize in declaration order
//! - Vectors serialize in index order
//! - Maps in hashed data are BTreeMaps, never HashMaps

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes.
///
/// Only used with types whose `Serialize` impls cannot fail (plain structs,
/// string-keyed maps).
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// xxh64 of the canonical bytes.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// [`canonical_hash`] as 16 lowercase hex digits.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_determinism() {
        let mut a = BTreeMap::new();
        a.insert("oslo", 1);
        a.insert("berlin", 2);

        let mut b = BTreeMap::new();
        b.insert("berlin", 2);
        b.insert("oslo", 1);

        assert_eq!(canonical_hash(&a), canonical_hash(&b));
    }

    #[test]
    fn test_hex_width() {
        assert_eq!(canonical_hash_hex(&["rust"]).len(), 16);
        assert_ne!(canonical_hash_hex(&["rust"]), canonical_hash_hex(&["go"]));
    }
}
