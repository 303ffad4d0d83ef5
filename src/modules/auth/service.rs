use anyhow::anyhow;
use coursehub_auth::create_access_token;
use coursehub_config::JwtConfig;
use coursehub_core::{AppError, hash_password};
use tracing::{info, instrument, warn};

use super::model::{Account, Credentials, LoginRequest, LoginResponse, RegisterRequest, Role};
use super::provider::AuthProvider;
use super::repository::AccountRepository;
use crate::metrics::{track_account_registered, track_login};

/// Role given to self-registered accounts.
pub const DEFAULT_ROLE: Role = Role::User;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(accounts, dto), fields(email = %dto.email))]
    pub async fn register(
        accounts: &dyn AccountRepository,
        dto: RegisterRequest,
    ) -> Result<Account, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let account = accounts
            .insert(&dto.email, &password_hash, Some(DEFAULT_ROLE))
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Email is already registered")))?;

        track_account_registered();
        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    #[instrument(skip(auth, accounts, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        auth: &dyn AuthProvider,
        accounts: &dyn AccountRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let principal = match auth.authenticate(&Credentials::from(dto)).await {
            Ok(principal) => principal,
            Err(err) => {
                track_login("failure");
                warn!("Login failed");
                return Err(err);
            }
        };

        let account = accounts
            .find(principal.account_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let access_token =
            create_access_token(account.id.into_inner(), &account.email, jwt_config)?;

        track_login("success");
        info!(account_id = %account.id, "Login succeeded");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            account,
        })
    }
}
