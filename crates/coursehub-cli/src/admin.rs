//! Administrator bootstrap.
//!
//! The HTTP API only ever creates `User` accounts; the first `Admin` has to be
//! inserted from the command line.

use coursehub_core::hash_password;
use coursehub_models::{AccountId, RegisterRequest, Role};
use sqlx::PgPool;
use validator::Validate;

/// Inserts an `Admin` account. Fails if the email is malformed, the password
/// is too short, or the email is already registered.
pub async fn create_admin(
    db: &PgPool,
    email: &str,
    password: &str,
) -> Result<AccountId, Box<dyn std::error::Error>> {
    let request = RegisterRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    request.validate()?;

    let password_hash = hash_password(&request.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let account_id = sqlx::query_scalar::<_, AccountId>(
        "INSERT INTO accounts (id, email, password_hash, primary_role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(AccountId::new())
    .bind(&request.email)
    .bind(&password_hash)
    .bind(Role::Admin)
    .fetch_optional(db)
    .await?;

    account_id.ok_or_else(|| "An account with this email already exists".into())
}
