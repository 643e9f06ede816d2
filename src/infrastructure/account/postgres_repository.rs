//! PostgreSQL account repository implementation

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::account::{Account, AccountId, AccountName, AccountRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of AccountRepository
///
/// Expects the `users` table from `schema/users.sql`.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using discrete connection fields
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(connect_options(config))
            .await?;

        Ok(Self::new(pool))
    }
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.database);

    if config.password.is_empty() {
        options
    } else {
        options.password(&config.password)
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.name())
        .bind(account.email())
        .bind(account.password_hash())
        .bind(account.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DomainError::DuplicateEmail;
                }
            }
            DomainError::from(e)
        })?;

        Ok(account)
    }

    async fn list_names(&self) -> Result<Vec<AccountName>, DomainError> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(names.into_iter().map(|name| AccountName { name }).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Columns that fail to decode (e.g. a NULL `name`) surface as `Storage`
fn row_to_account(row: &PgRow) -> Result<Account, DomainError> {
    Ok(Account::restore(
        AccountId::from_uuid(row.try_get("id")?),
        row.try_get::<String, _>("name")?,
        row.try_get::<String, _>("email")?,
        row.try_get::<String, _>("password_hash")?,
        row.try_get("created_at")?,
    ))
}
