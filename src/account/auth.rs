//! Password hashing for accounts

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
    #[error("invalid password")]
    InvalidPassword,
    #[error("hashing task failed: {0}")]
    TaskFailed(String),
}

/// Hash a password using Argon2id with a fresh random salt.
///
/// The returned PHC string embeds the salt, so two calls with the same
/// password never produce the same output.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|_| AuthError::InvalidPassword)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidPassword)
}

/// Hash on the blocking pool so request handlers keep making progress.
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::TaskFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "my_secure_password_123";
        let hash = hash_password(password).unwrap();

        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2id$"));

        // Verify correct password
        assert!(verify_password(password, &hash).is_ok());

        // Verify wrong password
        assert_eq!(
            verify_password("wrong_password", &hash),
            Err(AuthError::InvalidPassword)
        );
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("p", &first).is_ok());
        assert!(verify_password("p", &second).is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert_eq!(
            verify_password("p", "not-a-phc-string"),
            Err(AuthError::InvalidPassword)
        );
    }

    #[tokio::test]
    async fn test_blocking_hash() {
        let hash = hash_password_blocking("hunter2".to_string()).await.unwrap();
        assert!(verify_password("hunter2", &hash).is_ok());
    }
}
