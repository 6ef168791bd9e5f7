//! Passphrase hashing utilities

use sha2::{Digest, Sha256};

/// Hash a passphrase for storage using SHA-256 (lowercase hex)
pub fn hash_passphrase(passphrase: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a passphrase against a stored hash
pub fn verify_passphrase(passphrase: &str, stored_hash: &str) -> bool {
    hash_passphrase(passphrase) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_passphrase("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let passphrase = "secure_passphrase_123";
        let hashed = hash_passphrase(passphrase);

        assert_ne!(hashed, passphrase);
        assert!(verify_passphrase(passphrase, &hashed));
        assert!(!verify_passphrase("wrong_passphrase", &hashed));
    }
}
