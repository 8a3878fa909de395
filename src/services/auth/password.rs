/*
 * Responsibility
 * - one-way salted password hashing (Argon2id, PHC string output)
 * - verification against a stored digest
 * - the digest embeds its own salt; no side-channel storage needed
 */
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hash,
}

/// Hash a password with a fresh random salt.
///
/// Two calls with the same password produce different digests.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::fill(&mut salt_bytes).map_err(|_| PasswordError::Hash)?;

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| PasswordError::Hash)?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Check a password against a stored digest.
///
/// A malformed digest is an authentication failure (`false`), never an
/// error. Comparison is constant-time inside the argon2 crate.
pub fn verify_password(digest: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
