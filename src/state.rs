use std::sync::Arc;

use tokengate_config::{CorsConfig, JwtConfig, SeedConfig};
use tokengate_core::AppError;

use crate::modules::auth::store::UserStore;

/// Shared state of the auth service. Read-only after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub users: Arc<UserStore>,
}

pub fn init_app_state() -> Result<AppState, AppError> {
    Ok(AppState {
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        users: Arc::new(UserStore::seeded(&SeedConfig::from_env())?),
    })
}
