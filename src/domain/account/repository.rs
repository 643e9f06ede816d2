//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountName};
use crate::domain::DomainError;

/// Repository trait for account storage
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by exact email match
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account.
    ///
    /// Stores that enforce email uniqueness return `DomainError::DuplicateEmail`
    /// when the email is already taken.
    async fn insert(&self, account: Account) -> Result<Account, DomainError>;

    /// Names of every stored account, in store order
    async fn list_names(&self) -> Result<Vec<AccountName>, DomainError>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
