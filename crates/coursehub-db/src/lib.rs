//! # Coursehub DB
//!
//! PostgreSQL pool construction and the embedded schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::DatabaseConfig;
//! use coursehub_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! if config.run_migrations {
//!     run_migrations(&pool).await?;
//! }
//! ```

use coursehub_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations, embedded at compile time from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool using the given settings.
///
/// The returned pool is cheaply cloneable and should be shared through the
/// application state rather than re-created per request.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
