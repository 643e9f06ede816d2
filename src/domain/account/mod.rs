//! Account domain
//!
//! Domain types and the storage trait for registered accounts.

mod entity;
mod repository;

pub use entity::{Account, AccountId, AccountName};
pub use repository::AccountRepository;

#[cfg(test)]
pub use repository::mock::MockAccountRepository;
