use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login, me, register};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
