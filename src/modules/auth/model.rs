//! Authentication and account data models.
//!
//! Re-exports account and auth DTOs from the `coursehub-models` crate.

pub use coursehub_models::accounts::*;
pub use coursehub_models::auth::*;
pub use coursehub_models::ids::AccountId;

pub use coursehub_auth::Claims;

/// Email and password presented at login.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}
