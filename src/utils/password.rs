use argon2::{
    password_hash::{phc::PasswordHash, PasswordHasher, PasswordVerifier},
    Argon2,
};

use crate::error::AppResult;

/// Hash a password using Argon2id with default parameters.
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2.hash_password(password.as_bytes())?.to_string();

    Ok(password_hash)
}

/// Verify a password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash is
/// itself unparseable.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("secret123").expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_success() {
        let hash = hash_password("secret123").expect("Failed to hash password");

        assert!(verify_password("secret123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_failure() {
        let hash = hash_password("secret123").expect("Failed to hash password");

        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("secret123").expect("Failed to hash password");
        let hash2 = hash_password("secret123").expect("Failed to hash password");

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("secret123", &hash1).unwrap());
        assert!(verify_password("secret123", &hash2).unwrap());
    }
}
