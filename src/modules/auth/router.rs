use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_profile, login_user, refresh_token};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/profile", get(get_profile))
        .route("/refresh-token", post(refresh_token))
}
