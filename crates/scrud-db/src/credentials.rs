//! Password hashing for student and teacher accounts.
//!
//! Stored form is `"{salt_hex}${digest_hex}"` where the digest is
//! SHA-256 over `salt || password`. The store treats the string as opaque.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::StoreError;

const SALT_LEN: usize = 16;

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// Returns `StoreError::Credentials` if the password is empty or the OS
/// random source fails.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    if password.is_empty() {
        return Err(StoreError::Credentials("password must not be empty".into()));
    }
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt)
        .map_err(|e| StoreError::Credentials(format!("salt generation failed: {e}")))?;
    let digest = salted_digest(&salt, password);
    Ok(format!("{}${}", hex::encode(salt), hex::encode(digest)))
}

/// Check `password` against a stored hash. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };
    let actual = salted_digest(&salt, password);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

fn salted_digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let stored = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("battery staple", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn stored_form_is_salt_and_digest_hex() {
        let stored = hash_password("pw").unwrap();
        let (salt, digest) = stored.split_once('$').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(
            hash_password(""),
            Err(StoreError::Credentials(_))
        ));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "no-separator"));
        assert!(!verify_password("pw", "zz$zz"));
        assert!(!verify_password("pw", "00$00"));
    }
}
