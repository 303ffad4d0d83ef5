//! Role administration models.
//!
//! Re-exports account and role types from the `coursehub-models` crate.

pub use coursehub_models::accounts::{Account, ManageRolesView, Role, UpdateRoleRequest};
pub use coursehub_models::ids::AccountId;
