//! Domain layer - Core entities and storage traits

pub mod account;
pub mod error;

pub use account::{Account, AccountId, AccountName, AccountRepository};
pub use error::DomainError;
