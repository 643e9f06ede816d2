//! Infrastructure layer - Store, hashing and logging implementations

pub mod account;
pub mod logging;
