use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hashes a plaintext password with a fresh random salt.
///
/// The salt is embedded in the returned value, so verification only
/// needs the stored hash.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored hash.
///
/// A mismatch returns `Ok(false)`; a malformed stored hash is an
/// internal error, never "invalid credentials", so corruption is not
/// masked as a user mistake.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}
