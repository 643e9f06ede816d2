//! Credential service: registration, login and account listing

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::account::{Account, AccountName, AccountRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request for verifying credentials
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Hashed once at construction and verified against when the email is unknown,
/// so every miss costs exactly one hash verification, like a wrong password.
const DUMMY_PASSWORD: &str = "credential-service-dummy-password";

/// Credential service over an injected store and hasher
#[derive(Debug)]
pub struct CredentialService<R: AccountRepository + ?Sized, H: PasswordHasher + ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
    dummy_hash: String,
}

impl<R, H> CredentialService<R, H>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    /// Create a new credential service, hashing the dummy password up front
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Result<Self, DomainError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            repository,
            hasher,
            dummy_hash,
        })
    }

    /// Register a new account.
    ///
    /// The existence check and the insert are separate store calls, so two
    /// concurrent registrations for one email can both pass the check. Stores
    /// with a unique constraint turn the losing insert into `DuplicateEmail`.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError> {
        if self.repository.email_exists(&request.email).await? {
            info!("Registration rejected: email already registered");
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self.hash_password(request.password).await?;
        let account = Account::new(request.name, request.email, password_hash);

        let account = self.repository.insert(account).await?;
        info!(account_id = %account.id(), "Account registered");

        Ok(account)
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    /// Never writes to the store.
    pub async fn login(&self, request: LoginRequest) -> Result<Account, DomainError> {
        let account = self.repository.find_by_email(&request.email).await?;

        let hash = match &account {
            Some(account) => account.password_hash().to_string(),
            None => self.dummy_hash.clone(),
        };

        let verified = self.verify_password(request.password, hash).await?;

        match account {
            Some(account) if verified => {
                info!(account_id = %account.id(), "Login succeeded");
                Ok(account)
            }
            _ => {
                warn!("Login failed: invalid credentials");
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    /// Names of all registered accounts, in store order
    pub async fn list_names(&self) -> Result<Vec<AccountName>, DomainError> {
        let names = self.repository.list_names().await?;
        debug!(count = names.len(), "Listed account names");
        Ok(names)
    }

    /// Check the underlying store is reachable
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::MockAccountRepository;
    use crate::infrastructure::account::password::BcryptHasher;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::infrastructure::account::repository::InMemoryAccountRepository;

    fn hasher() -> Arc<BcryptHasher> {
        Arc::new(BcryptHasher::with_cost(4))
    }

    fn create_service() -> CredentialService<InMemoryAccountRepository, BcryptHasher> {
        CredentialService::new(Arc::new(InMemoryAccountRepository::new()), hasher()).unwrap()
    }

    /// Bcrypt hasher that counts how often each operation runs
    #[derive(Debug, Default)]
    struct CountingHasher {
        inner: BcryptHasher,
        hashes: AtomicUsize,
        verifies: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            self.inner.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }
    }

    fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let hasher = hasher();
        let service = CredentialService::new(Arc::clone(&repository), Arc::clone(&hasher)).unwrap();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();

        let stored = repository.find_by_email("ana@x.com").await.unwrap().unwrap();
        assert_eq!(stored.name(), "Ana");
        assert_ne!(stored.password_hash(), "s3cr3t");
        assert!(hasher.verify("s3cr3t", stored.password_hash()));
        assert_eq!(repository.list_names().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();

        let result = service
            .register(register_request("Ana2", "ana@x.com", "other"))
            .await;
        assert!(matches!(result, Err(DomainError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_without_name() {
        let service = create_service();

        let account = service
            .register(register_request("", "anon@x.com", "s3cr3t"))
            .await
            .unwrap();
        assert_eq!(account.name(), "");
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = create_service();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();

        let account = service.login(login_request("ana@x.com", "s3cr3t")).await.unwrap();
        assert_eq!(account.email(), "ana@x.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = create_service();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();

        let wrong_password = service
            .login(login_request("ana@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_request("nobody@x.com", "s3cr3t"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown_email, DomainError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_with_dummy_password_on_unknown_email_fails() {
        let service = create_service();

        let result = service.login(login_request("nobody@x.com", DUMMY_PASSWORD)).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_login_costs_one_verification() {
        let hasher = Arc::new(CountingHasher {
            inner: BcryptHasher::with_cost(4),
            ..Default::default()
        });
        let service =
            CredentialService::new(Arc::new(InMemoryAccountRepository::new()), Arc::clone(&hasher))
                .unwrap();
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);

        for attempt in 1..=3 {
            let result = service.login(login_request("nobody@x.com", "s3cr3t")).await;

            assert!(matches!(result, Err(DomainError::InvalidCredentials)));
            assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);
            assert_eq!(hasher.verifies.load(Ordering::SeqCst), attempt);
        }
    }

    #[test]
    fn test_new_rejects_unusable_hasher() {
        let result = CredentialService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(BcryptHasher::with_cost(2)),
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_login_is_idempotent_and_read_only() {
        let repository = Arc::new(MockAccountRepository::new());
        let service = CredentialService::new(Arc::clone(&repository), hasher()).unwrap();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();
        assert_eq!(repository.insert_count(), 1);

        for _ in 0..3 {
            assert!(service.login(login_request("ana@x.com", "s3cr3t")).await.is_ok());
            assert!(matches!(
                service.login(login_request("ana@x.com", "wrong")).await,
                Err(DomainError::InvalidCredentials)
            ));
        }

        assert_eq!(repository.insert_count(), 1);
        assert_eq!(repository.accounts_with_email("ana@x.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_names() {
        let service = create_service();

        service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap();
        service
            .register(register_request("Bruno", "bruno@x.com", "s3cr3t"))
            .await
            .unwrap();

        let mut names = service.list_names().await.unwrap();
        names.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            names,
            vec![
                AccountName { name: "Ana".to_string() },
                AccountName { name: "Bruno".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_verbatim() {
        let repository = Arc::new(MockAccountRepository::new());
        let service = CredentialService::new(Arc::clone(&repository), hasher()).unwrap();
        repository.set_should_fail(true).await;

        let register = service
            .register(register_request("Ana", "ana@x.com", "s3cr3t"))
            .await
            .unwrap_err();
        let login = service
            .login(login_request("ana@x.com", "s3cr3t"))
            .await
            .unwrap_err();
        let list = service.list_names().await.unwrap_err();

        for err in [register, login, list] {
            assert!(matches!(err, DomainError::Storage { .. }));
            assert_eq!(err.to_string(), "Mock repository configured to fail");
        }
        assert!(service.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_register_with_unique_constraint() {
        let repository = Arc::new(MockAccountRepository::new().with_lookup_barrier(2));
        let service = Arc::new(CredentialService::new(Arc::clone(&repository), hasher()).unwrap());

        let first = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.register(register_request("Ana", "ana@x.com", "a")).await }
        });
        let second = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.register(register_request("Ana2", "ana@x.com", "b")).await }
        });

        let results = [first.await.unwrap(), second.await.unwrap()];

        // Both passed the existence check; the store rejects the second insert
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(DomainError::DuplicateEmail))));
        assert_eq!(repository.accounts_with_email("ana@x.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_register_without_unique_constraint() {
        let repository = Arc::new(
            MockAccountRepository::new()
                .without_unique_constraint()
                .with_lookup_barrier(2),
        );
        let service = Arc::new(CredentialService::new(Arc::clone(&repository), hasher()).unwrap());

        let first = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.register(register_request("Ana", "ana@x.com", "a")).await }
        });
        let second = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.register(register_request("Ana2", "ana@x.com", "b")).await }
        });

        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_ok());

        // Known race: without a store constraint both accounts land
        assert_eq!(repository.accounts_with_email("ana@x.com").await.len(), 2);
    }
}
