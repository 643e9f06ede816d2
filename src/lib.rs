//! Credential Service
//!
//! Account registration and login over HTTP:
//! - bcrypt (or Argon2) password hashing
//! - PostgreSQL or in-memory account store
//! - duplicate email rejection and indistinguishable login failures

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::account::AccountRepository;
use infrastructure::account::{
    create_hasher, CredentialService, InMemoryAccountRepository, PostgresAccountRepository,
};

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_repository(config).await?;
    let hasher = create_hasher(&config.hashing).context("Invalid hashing configuration")?;

    info!(
        algorithm = ?config.hashing.algorithm,
        bcrypt_cost = config.hashing.bcrypt_cost,
        "Password hasher configured"
    );

    let service = CredentialService::new(repository, hasher)
        .context("Failed to prepare credential service")?;
    Ok(AppState::new(Arc::new(service)))
}

async fn create_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn AccountRepository>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let db = &config.database;
            info!(host = %db.host, port = db.port, database = %db.database, "Connecting to PostgreSQL...");

            let repository = PostgresAccountRepository::connect(db)
                .await
                .context("Failed to connect to PostgreSQL")?;

            info!("PostgreSQL connection established");
            Ok(Arc::new(repository))
        }
        StorageBackend::Memory => {
            info!("Using in-memory account store");
            Ok(Arc::new(InMemoryAccountRepository::new()))
        }
    }
}
