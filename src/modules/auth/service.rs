use anyhow::anyhow;
use tracing::{info, instrument, warn};

use tokengate_auth::{User, create_access_token, create_refresh_token, verify_refresh_token};
use tokengate_config::JwtConfig;
use tokengate_core::{AppError, verify_password};

use super::model::LoginRequest;
use super::store::UserStore;

/// Both tokens minted at login, plus the user they describe.
#[derive(Debug)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

pub struct AuthService;

impl AuthService {
    /// Checks credentials and mints a fresh token pair.
    ///
    /// Unknown usernames and wrong passwords fail with different statuses
    /// (`404` and `401`).
    #[instrument(skip_all, fields(username = %dto.username))]
    pub fn login(
        users: &UserStore,
        dto: &LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<Session, AppError> {
        let record = users.find_by_username(&dto.username).ok_or_else(|| {
            warn!("Login for unknown user");
            AppError::not_found(anyhow!("User not found"))
        })?;

        if !verify_password(&dto.password, &record.password_hash)? {
            warn!("Login with wrong password");
            return Err(AppError::unauthorized(anyhow!("Wrong password")));
        }

        let user = record.user();
        let access_token = create_access_token(&user, jwt_config)?;
        let refresh_token = create_refresh_token(&user, jwt_config)?;

        info!(user_id = user.id, "Login succeeded");

        Ok(Session {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated.
    #[instrument(skip_all)]
    pub fn refresh(
        users: &UserStore,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;

        let record = users
            .find_by_id(claims.id)
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let access_token = create_access_token(&record.user(), jwt_config)?;
        info!(user_id = record.id, "Access token refreshed");

        Ok(access_token)
    }
}
