//! Role-based authorization middleware for Axum

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use coursehub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::Role;
use crate::state::AppState;

/// Lets the request through when the authenticated principal holds one of
/// `allowed_roles`; otherwise answers 401 or 403.
pub async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !state.auth.authorize(&auth_user.0, allowed_roles) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            auth_user.role()
        )));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Route layer for administrator-only routers.
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::middleware::role::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/users", get(list_users))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
