//! # Coursehub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address and auxiliary ports
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{ConfigError, DatabaseConfig};
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag: `false`/`0` disable, anything else enables.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v != "false" && v != "0"
        })
        .unwrap_or(default)
}
