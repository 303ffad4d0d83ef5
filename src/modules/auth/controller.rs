use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use coursehub_core::AppError;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{Account, LoginRequest, LoginResponse, Principal, RegisterRequest};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Per-field messages, present for validation failures
    #[schema(value_type = Option<Object>)]
    pub fields: Option<serde_json::Value>,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = Account),
        (status = 400, description = "Bad request - email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = AuthService::register(state.accounts.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(
        state.auth.as_ref(),
        state.accounts.as_ref(),
        dto,
        &state.jwt_config,
    )
    .await?;
    Ok(Json(response))
}

/// The signed-in principal
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current principal", body = Principal),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(auth_user))]
pub async fn me(auth_user: AuthUser) -> Json<Principal> {
    Json(auth_user.0)
}
