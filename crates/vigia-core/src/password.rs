//! Password hashing and verification for credential issuance.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes a plaintext password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::internal)
}

/// Verifies a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed).map_err(AppError::internal)
}
