//! Account infrastructure module
//!
//! Password hashing (bcrypt or Argon2), the in-memory and PostgreSQL account
//! stores, and the credential service that ties them together.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{create_hasher, Argon2Hasher, BcryptHasher, PasswordHasher, DEFAULT_BCRYPT_COST};
pub use postgres_repository::PostgresAccountRepository;
pub use repository::InMemoryAccountRepository;
pub use service::{CredentialService, LoginRequest, RegisterRequest};
