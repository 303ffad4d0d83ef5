use anyhow::Context;
use async_trait::async_trait;
use coursehub_core::AppError;
use tracing::instrument;

use super::model::{Account, AccountId, AccountRecord, Role};
use crate::store::{PgStore, map_write_error};

/// The identity store: accounts, their password hashes and their role.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts ordered by email.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    async fn find(&self, id: AccountId) -> Result<Option<Account>, AppError>;

    /// Case-insensitive lookup including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AppError>;

    /// Returns `None` when the email is already registered.
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        role: Option<Role>,
    ) -> Result<Option<Account>, AppError>;

    /// Replaces the account's role. Returns `None` for an unknown account.
    async fn set_role(&self, id: AccountId, role: Option<Role>) -> Result<Option<Account>, AppError>;
}

const ACCOUNT_COLUMNS: &str = "id, email, primary_role, created_at";

#[async_trait]
impl AccountRepository for PgStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY email"
        ))
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch accounts")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch account by ID")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AppError> {
        sqlx::query_as::<_, AccountRecord>(
            "SELECT id, email, password_hash, primary_role, created_at FROM accounts WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch account by email")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, password_hash))]
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        role: Option<Role>,
    ) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (id, email, password_hash, primary_role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(AccountId::new())
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: AccountId, role: Option<Role>) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET primary_role = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(role)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }
}
