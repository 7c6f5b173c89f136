//! Account storage

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use super::types::{Account, NewAccount};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("account with email '{0}' already exists")]
    AlreadyExists(String),
    #[error("account store lock poisoned")]
    Poisoned,
}

/// Storage backend for registered accounts.
///
/// `insert_if_absent` must check for the email and insert in one atomic
/// step; two concurrent inserts with the same email admit exactly one.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store the account and assign the next sequential id
    async fn insert_if_absent(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Process-memory account store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>, RepositoryError> {
        self.accounts.lock().map_err(|e| {
            tracing::error!("Account store mutex poisoned: {}", e);
            RepositoryError::Poisoned
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_if_absent(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut accounts = self.lock()?;

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(RepositoryError::AlreadyExists(account.email));
        }

        let id = accounts.len() as u64 + 1;
        let account = account.into_account(id);
        accounts.push(account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self.lock()?.iter().find(|a| a.email == email).cloned())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}
