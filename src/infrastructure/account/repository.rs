//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountName, AccountRepository};
use crate::domain::DomainError;

/// Accounts and their email index, guarded together so a lookup never waits
/// on one map while holding the other.
#[derive(Debug, Default)]
struct AccountTable {
    accounts: HashMap<AccountId, Account>,
    /// Index for email -> account ID lookup
    email_index: HashMap<String, AccountId>,
}

/// In-memory implementation of AccountRepository
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    table: Arc<RwLock<AccountTable>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .email_index
            .get(email)
            .and_then(|id| table.accounts.get(id))
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        let mut table = self.table.write().await;

        if table.email_index.contains_key(account.email()) {
            return Err(DomainError::DuplicateEmail);
        }

        table
            .email_index
            .insert(account.email().to_string(), account.id());
        table.accounts.insert(account.id(), account.clone());

        Ok(account)
    }

    async fn list_names(&self) -> Result<Vec<AccountName>, DomainError> {
        let table = self.table.read().await;
        Ok(table.accounts.values().map(AccountName::from).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
