//! Password hashing with bcrypt or Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt::Debug;
use std::sync::Arc;

use crate::config::{HashAlgorithm, HashingConfig};
use crate::domain::DomainError;

/// bcrypt work factor used unless configured otherwise
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash; malformed hashes never verify
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt-based password hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Build the configured hasher
pub fn create_hasher(config: &HashingConfig) -> Result<Arc<dyn PasswordHasher>, DomainError> {
    match config.algorithm {
        HashAlgorithm::Bcrypt => {
            if !BCRYPT_COST_RANGE.contains(&config.bcrypt_cost) {
                return Err(DomainError::configuration(format!(
                    "bcrypt cost must be between {} and {}, got {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end(),
                    config.bcrypt_cost
                )));
            }
            Ok(Arc::new(BcryptHasher::with_cost(config.bcrypt_cost)))
        }
        HashAlgorithm::Argon2 => Ok(Arc::new(Argon2Hasher::new())),
    }
}
