use anyhow::anyhow;
use coursehub_core::AppError;
use tracing::{info, instrument};

use super::model::{Account, AccountId, ManageRolesView, Role};
use crate::metrics::track_role_change;
use crate::modules::auth::repository::AccountRepository;

pub struct RoleService;

impl RoleService {
    #[instrument(skip(accounts))]
    pub async fn list_accounts(accounts: &dyn AccountRepository) -> Result<Vec<Account>, AppError> {
        accounts.list().await
    }

    #[instrument(skip(accounts))]
    pub async fn manage_view(
        accounts: &dyn AccountRepository,
        account_id: AccountId,
    ) -> Result<ManageRolesView, AppError> {
        let account = accounts
            .find(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;
        Ok(ManageRolesView::new(account))
    }

    /// Replaces the account's role with `selected_role`.
    ///
    /// A blank or unrecognised name leaves the account with no role.
    #[instrument(skip(accounts))]
    pub async fn update_role(
        accounts: &dyn AccountRepository,
        account_id: AccountId,
        selected_role: Option<&str>,
    ) -> Result<Account, AppError> {
        let role = selected_role.and_then(Role::parse);

        let account = accounts
            .set_role(account_id, role)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        track_role_change(role.as_ref().map(Role::as_str));
        info!(account_id = %account_id, role = ?role, "Account role replaced");
        Ok(account)
    }
}
