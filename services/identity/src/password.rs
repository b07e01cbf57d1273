//! Password hashing and verification
//!
//! One-way, salted argon2 transformation of plaintext secrets. Two calls
//! with the same secret produce different digests; both verify.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::error::{IdentityError, IdentityResult};

/// Hash a plaintext password into a storable digest
pub fn hash_password(password: &str) -> IdentityResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    let digest = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IdentityError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(digest)
}

/// Verify a plaintext password against a stored digest
///
/// Returns `false` for a mismatched, malformed, or corrupted digest; the
/// caller cannot distinguish the cases.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    let argon2 = Argon2::default();
    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
