//! Argon2 password hashing and verification.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use super::AuthError;

/// Hashes a password with Argon2id and a random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`) to store alongside the
/// username.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
}

/// Checks a password against a stored PHC hash.
///
/// Fails closed: a malformed hash or any verifier error yields `false`.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Returns true when `hash` parses as a PHC string.
pub fn is_valid_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        // Arrange
        let hash = hash_password("correct horse").expect("Should hash password");

        // Act & Assert
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        // Act
        let first = hash_password("same").expect("Should hash password");
        let second = hash_password("same").expect("Should hash password");

        // Assert
        assert_ne!(first, second, "Salts should differ between hashes");
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-hash"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_is_valid_hash() {
        // Arrange
        let hash = hash_password("pw").expect("Should hash password");

        // Act & Assert
        assert!(is_valid_hash(&hash));
        assert!(!is_valid_hash("plaintext"));
    }
}
