//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hash bytes using SHA-256, hex encoded
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Verify a hash matches the input
pub fn verify_hash(input: &[u8], hash: &str) -> bool {
    constant_time_eq(hash_bytes(input).as_bytes(), hash.trim().to_lowercase().as_bytes())
}

/// Compare two secrets without leaking where they differ
///
/// Both sides are hashed first so the comparison length is fixed.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    constant_time_eq(&a, &b)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let hash1 = hash_bytes(b"test");
        let hash2 = hash_bytes(b"test");
        let hash3 = hash_bytes(b"different");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(
            hash1,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_verify_hash() {
        let input = b"backup payload";
        let hash = hash_bytes(input);

        assert!(verify_hash(input, &hash));
        assert!(verify_hash(input, &hash.to_uppercase()));
        assert!(!verify_hash(b"tampered payload", &hash));
    }

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("bridge-secret", "bridge-secret"));
        assert!(!secrets_match("bridge-secret", "bridge-secreT"));
        assert!(!secrets_match("", "bridge-secret"));
    }
}
