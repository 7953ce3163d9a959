//! Credential pre-hashing
//!
//! One-way transform applied to passwords before they leave the client,
//! distinct from whatever storage hashing the service does on its side.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Pre-hash a password with the configured salt.
///
/// SHA-256 over `password + salt`, rendered as 64 lowercase hex characters.
/// Pure and side-effect free. Fails with [`Error::CryptoFailure`] when no
/// salt is configured; callers must never send the plaintext instead.
pub fn prehash_password(password: &str, salt: &str) -> Result<String> {
    if salt.is_empty() {
        return Err(Error::CryptoFailure(
            "no pre-hash salt configured".to_string(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("p@sspepper")
        assert_eq!(
            prehash_password("p@ss", "pepper").unwrap(),
            "fc5960dba33a0c8c7797809d7eac19d62528f805cbdaca0b77424a8d5f79b8bf"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = prehash_password("secret123", "pepper").unwrap();
        let b = prehash_password("secret123", "pepper").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_salt_sensitivity() {
        let pepper = prehash_password("p@ss", "pepper").unwrap();
        let salt = prehash_password("p@ss", "salt").unwrap();
        assert_ne!(pepper, salt);
        assert_eq!(
            salt,
            "5c10817dbb5e9211be83b145b86df1ff2dfafd45ab6583720bba5a9353d39144"
        );
    }

    #[test]
    fn test_digest_shape() {
        let digest = prehash_password("secret123", "pepper").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_missing_salt_is_a_hard_failure() {
        let result = prehash_password("secret123", "");
        assert!(matches!(result, Err(Error::CryptoFailure(_))));
    }
}
