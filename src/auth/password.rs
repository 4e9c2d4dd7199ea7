//! Salted password hashing.
//!
//! The account store never keeps or compares raw secrets: registration hashes
//! the password with a per-user random salt and login recomputes the digest
//! for comparison. The hasher sits behind a trait so embedders can swap in a
//! slower KDF without touching the account manager.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hashing seam used by the account manager
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password into a self-contained verifiable string
    fn hash(&self, password: &str) -> String;

    /// Verify a raw password against a stored hash
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Salted SHA-256 hasher storing `salt$digest` with a hex-encoded digest
#[derive(Debug, Clone, Default)]
pub struct SaltedSha256;

impl SaltedSha256 {
    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PasswordHasher for SaltedSha256 {
    fn hash(&self, password: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest(&salt, password);
        format!("{}${}", salt, digest)
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match stored.split_once('$') {
            Some((salt, digest)) => Self::digest(salt, password) == digest,
            // A stored value without a salt separator never verifies
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = SaltedSha256;
        let stored = hasher.hash("hunter2");
        assert!(hasher.verify("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hasher = SaltedSha256;
        let stored = hasher.hash("hunter2");
        assert!(!hasher.verify("hunter3", &stored));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let hasher = SaltedSha256;
        let first = hasher.hash("same-password");
        let second = hasher.hash("same-password");
        assert_ne!(first, second);
    }

    #[test]
    fn stored_value_never_contains_password() {
        let hasher = SaltedSha256;
        let stored = hasher.hash("topsecret");
        assert!(!stored.contains("topsecret"));
    }

    #[test]
    fn malformed_stored_value_fails_closed() {
        let hasher = SaltedSha256;
        assert!(!hasher.verify("anything", "no-separator-here"));
        assert!(!hasher.verify("anything", ""));
    }
}
