use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with a fresh random salt at the given bcrypt work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Compares `password` against a stored bcrypt hash.
///
/// A mismatch is `Ok(false)`. A hash that bcrypt cannot parse is an internal error,
/// never a successful match.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
