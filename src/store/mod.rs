//! Storage adapters behind the repository traits.
//!
//! [`PgStore`] is the production adapter. [`memory::MemoryStore`] keeps
//! everything in process and is compiled for tests and the `test-utils`
//! feature only.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use anyhow::anyhow;
use coursehub_core::AppError;
use sqlx::PgPool;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a failed write to an [`AppError`].
///
/// Constraint violations are the client's fault and answer 400; anything else
/// is a 500.
pub(crate) fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!("A record with the same values already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Referenced student or course does not exist"));
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or("check").to_string();
            return AppError::bad_request(anyhow!("Value violates constraint {}", constraint));
        }
    }
    AppError::database(err)
}
