//! # Coursehub Auth
//!
//! Bearer token support for the coursehub API.
//!
//! - [`claims`]: JWT claim structure carried by access tokens
//! - [`jwt`]: Token creation and verification
//!
//! Tokens only identify the account. The account's role is looked up on every
//! request so that a role change takes effect without re-issuing tokens.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{create_access_token, verify_token};
//! use coursehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(account_id, "student@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, account_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
