//! Credential hashing for the admin gate.
//!
//! The only secret in the system is the single admin password. It is
//! stored (in configuration, not the database) as a salted SHA-256 hex
//! digest and compared in constant time on login.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash a secret for storage/comparison.
/// Uses SHA-256 with application salt, returns lowercase hex string.
pub fn hash_secret(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"substore-v1:");
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against a stored hash without leaking timing
/// information about how much of the digest matched.
pub fn verify_secret(input: &str, expected_hash: &str) -> bool {
    let computed = hash_secret(input);
    let computed = computed.as_bytes();
    let expected = expected_hash.trim().as_bytes();
    if computed.len() != expected.len() {
        return false;
    }
    computed.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_hex() {
        let a = hash_secret("password");
        let b = hash_secret("password");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_accepts_match_and_rejects_mismatch() {
        let hash = hash_secret("correct horse");
        assert!(verify_secret("correct horse", &hash));
        assert!(!verify_secret("wrong horse", &hash));
        assert!(!verify_secret("correct horse", "not-a-hash"));
    }
}
