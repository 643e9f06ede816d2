//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{Account, AccountName, AccountRepository};
use crate::domain::DomainError;
use crate::infrastructure::account::{CredentialService, LoginRequest, PasswordHasher, RegisterRequest};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServiceTrait>,
}

impl AppState {
    pub fn new(credential_service: Arc<dyn CredentialServiceTrait>) -> Self {
        Self { credential_service }
    }
}

/// Trait for credential service operations
#[async_trait::async_trait]
pub trait CredentialServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError>;
    async fn login(&self, request: LoginRequest) -> Result<Account, DomainError>;
    async fn list_names(&self) -> Result<Vec<AccountName>, DomainError>;
    async fn health_check(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> CredentialServiceTrait for CredentialService<R, H>
where
    R: AccountRepository + ?Sized + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError> {
        CredentialService::register(self, request).await
    }

    async fn login(&self, request: LoginRequest) -> Result<Account, DomainError> {
        CredentialService::login(self, request).await
    }

    async fn list_names(&self) -> Result<Vec<AccountName>, DomainError> {
        CredentialService::list_names(self).await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        CredentialService::health_check(self).await
    }
}
