//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Principal extractors and role-check extractors
//! - [`role`]: Router-level role middleware
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the JWT and loads the account's current role
//! 3. Role extractors (`RequireAdmin`, `RequireMember`, `RequireStudentRole`)
//!    or the `require_admin` route layer check the role
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireAdmin};
//!
//! async fn me(auth_user: AuthUser) -> impl IntoResponse {
//!     Json(auth_user.0)
//! }
//!
//! async fn create_course(RequireAdmin(_admin): RequireAdmin) -> impl IntoResponse {
//!     // Only executes for administrators
//! }
//! ```

pub mod auth;
pub mod role;
