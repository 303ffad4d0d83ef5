use axum::{
    Json,
    extract::{Path, State},
};
use coursehub_core::AppError;
use tracing::instrument;

use super::model::{Account, AccountId, ManageRolesView, UpdateRoleRequest};
use super::service::RoleService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// List every account with its role
#[utoipa::path(
    get,
    path = "/api/roles/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<Account>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = RoleService::list_accounts(state.accounts.as_ref()).await?;
    Ok(Json(accounts))
}

#[utoipa::path(
    get,
    path = "/api/roles/users/{user_id}",
    params(("user_id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Current role and assignable roles", body = ManageRolesView),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn manage_roles(
    State(state): State<AppState>,
    Path(user_id): Path<AccountId>,
) -> Result<Json<ManageRolesView>, AppError> {
    let view = RoleService::manage_view(state.accounts.as_ref(), user_id).await?;
    Ok(Json(view))
}

/// Replace an account's role
///
/// An empty or unknown `selected_role` removes the role.
#[utoipa::path(
    put,
    path = "/api/roles/users/{user_id}",
    params(("user_id" = String, Path, description = "Account ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role replaced", body = Account),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn update_roles(
    State(state): State<AppState>,
    Path(user_id): Path<AccountId>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<Account>, AppError> {
    let account = RoleService::update_role(
        state.accounts.as_ref(),
        user_id,
        request.selected_role.as_deref(),
    )
    .await?;
    Ok(Json(account))
}
