use crate::modules::roles::controller::{list_users, manage_roles, update_roles};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Role administration routes. The caller layers `require_admin` on top.
pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(manage_roles).put(update_roles))
}
