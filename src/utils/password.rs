use anyhow::Context;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .context("Failed to verify password")
        .map_err(AppError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password("Password1").unwrap();
        assert_ne!(hashed, "Password1");
        assert!(verify_password("Password1", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Password1").unwrap();
        let second = hash_password("Password1").unwrap();
        assert_ne!(first, second);
    }
}
