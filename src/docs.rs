use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    ErrorResponse, LoginRequest, LoginResponse, LoginUser, ProfileResponse, RefreshResponse,
};
use crate::modules::health::HealthResponse;
use tokengate_auth::Claims;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::refresh_token,
        crate::modules::health::health,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginUser,
            ProfileResponse,
            RefreshResponse,
            Claims,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance and verification"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Tokengate Auth Service",
        version = "0.1.0",
        description = "Issues, verifies and refreshes access/refresh token pairs.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
