//! Registration and login entry points

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::auth::{hash_password_blocking, AuthError};
use super::store::{AccountRepository, RepositoryError};
use super::types::{AccountId, NewAccount};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Please provide all required fields.")]
    Validation,
    #[error("User with this email already exists.")]
    Conflict,
    #[error(transparent)]
    Hashing(#[from] AuthError),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for RegistryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(_) => RegistryError::Conflict,
            other => RegistryError::Repository(other),
        }
    }
}

/// Acknowledgment returned by the login endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct LoginAck {
    pub message: String,
}

#[derive(Clone)]
pub struct AccountRegistry {
    repository: Arc<dyn AccountRepository>,
}

impl AccountRegistry {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Register a new account and return its id.
    ///
    /// All three fields must be non-empty. The password is hashed off the
    /// async workers; the email check that decides the outcome is the
    /// repository's atomic insert.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountId, RegistryError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(RegistryError::Validation);
        }

        // Skip the expensive hash for an email we already know about
        if self.repository.find_by_email(email).await?.is_some() {
            debug!("Signup rejected, email already registered: {}", email);
            return Err(RegistryError::Conflict);
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;

        let account = self
            .repository
            .insert_if_absent(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(
            "New user signed up: id={} username={} email={}",
            account.id, account.username, account.email
        );

        Ok(account.id)
    }

    /// Acknowledge a login attempt.
    ///
    /// Credentials are not checked and no session is issued; the stored
    /// accounts are never read here.
    pub fn authenticate(&self, email: Option<&str>, _password: Option<&str>) -> LoginAck {
        let email = email.unwrap_or("undefined");
        debug!("Login endpoint called for {}", email);

        LoginAck {
            message: format!(
                "Login endpoint called for user: {}. Implement login logic here.",
                email
            ),
        }
    }
}
