use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use tokengate_core::AppError;

use super::model::{
    ErrorResponse, LoginRequest, LoginResponse, LoginUser, ProfileResponse, RefreshResponse,
};
use super::service::AuthService;
use crate::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, token_cookie};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive the token pair
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; accessToken and refreshToken cookies set", body = LoginResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let session = AuthService::login(&state.users, &dto, &state.jwt_config)?;

    let jar = jar
        .add(token_cookie(
            REFRESH_TOKEN_COOKIE,
            session.refresh_token.clone(),
        ))
        .add(token_cookie(
            ACCESS_TOKEN_COOKIE,
            session.access_token.clone(),
        ));

    Ok((
        jar,
        Json(LoginResponse {
            access_token: session.access_token,
            user: LoginUser {
                id: session.user.id,
                username: session.user.username,
                role: session.user.role,
            },
        }),
    ))
}

/// Get the authenticated user's claims
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Claims of the bearer token", body = ProfileResponse),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = auth_user.0.id))]
pub async fn get_profile(auth_user: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Welcome!".to_string(),
        user: auth_user.0,
    })
}

/// Exchange the refresh token cookie for a new access token
#[utoipa::path(
    post,
    path = "/api/refresh-token",
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "No refresh token cookie", body = ErrorResponse),
        (status = 403, description = "Invalid refresh token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthorized(anyhow!("No refresh token")))?;

    let access_token = AuthService::refresh(&state.users, token, &state.jwt_config)?;

    Ok(Json(RefreshResponse { access_token }))
}
