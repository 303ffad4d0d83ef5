use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use coursehub_auth::verify_token;

use crate::modules::auth::model::{AccountId, Principal, Role};
use crate::state::AppState;
use coursehub_core::AppError;

/// Extractor that validates the bearer token and loads the caller's principal.
///
/// The role comes from the account store on every request, so a role change
/// applies to tokens that were issued before it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn account_id(&self) -> AccountId {
        self.0.account_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> Option<Role> {
        self.0.role
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.jwt_config)?;

        let account_id = claims
            .account_id()
            .map(AccountId::from)
            .ok_or_else(|| AppError::unauthorized("Invalid account ID in token"))?;

        let principal = state
            .auth
            .principal(account_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        Ok(AuthUser(principal))
    }
}

/// Optional authentication for anonymous endpoints.
///
/// A missing, malformed or expired token yields `None` instead of a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }

        match AuthUser::from_request_parts(parts, state).await {
            Ok(AuthUser(principal)) => Ok(MaybeAuthUser(Some(principal))),
            Err(err) if err.status.is_server_error() => Err(err),
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}

/// Helper macro to create role check extractors.
///
/// The generated extractor rejects with 401 when the caller is not signed in
/// and with 403 when the caller holds none of the listed roles.
#[macro_export]
macro_rules! require_role {
    ($name:ident, [$($role:expr),+ $(,)?]) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = coursehub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                let required = [$($role),+];
                if !state.auth.authorize(&auth_user.0, &required) {
                    return Err(coursehub_core::AppError::forbidden(format!(
                        "Access denied. Required role: {}",
                        required.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(" or ")
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, [Role::Admin]);
require_role!(RequireMember, [Role::Admin, Role::User]);
require_role!(RequireStudentRole, [Role::User]);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc"))).unwrap(), "abc");

        let err = bearer_token(&parts_with(Some("Basic abc"))).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);

        let err = bearer_token(&parts_with(None)).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
