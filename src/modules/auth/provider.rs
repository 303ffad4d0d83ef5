//! Pluggable authentication and authorization.
//!
//! Entity services never see credentials. Handlers receive a [`Principal`]
//! from the extractors in `middleware::auth`, which resolve it through an
//! [`AuthProvider`].

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use coursehub_core::{AppError, hash_password, verify_password};
use tracing::instrument;

use super::model::{AccountId, Credentials, Principal, Role};
use super::repository::AccountRepository;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Checks credentials and returns the matching principal.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, AppError>;

    /// Loads the current principal for an account id taken from a token.
    async fn principal(&self, account_id: AccountId) -> Result<Option<Principal>, AppError>;

    /// True when the principal holds one of `required` roles.
    fn authorize(&self, principal: &Principal, required: &[Role]) -> bool {
        principal.has_any_role(required)
    }
}

/// Hash checked against when the email is unknown, so a miss costs the same
/// bcrypt work as a wrong password.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("coursehub-unknown-account").ok());

/// [`AuthProvider`] backed by the account store with bcrypt password hashes.
pub struct StoreAuthProvider {
    accounts: Arc<dyn AccountRepository>,
}

impl StoreAuthProvider {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl AuthProvider for StoreAuthProvider {
    #[instrument(skip(self))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, AppError> {
        let Some(record) = self.accounts.find_by_email(&credentials.email).await? else {
            if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
                verify_password(&credentials.password, hash)?;
            }
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&credentials.password, &record.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(Principal {
            account_id: record.id,
            email: record.email,
            role: record.primary_role,
        })
    }

    async fn principal(&self, account_id: AccountId) -> Result<Option<Principal>, AppError> {
        Ok(self.accounts.find(account_id).await?.map(Principal::from))
    }
}
