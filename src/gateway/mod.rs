//! The edge gateway.
//!
//! Every request passes through a [`Pipeline`] of interceptors before it
//! reaches a route:
//!
//! 1. **token_refresh** (all paths): refreshes an expired access token
//! 2. **auth_gate** (`/admin`, except the login page): requires a token
//! 3. **role_gate** (`/admin/settings`, `/admin/users`): requires `admin`
//! 4. **api_proxy** (`/api/`, except login, refresh and health): forwards to
//!    `API_URL` with a bearer credential
//!
//! Tokens are decoded here but never verified; the auth service and the
//! backend remain the authority on signatures.

pub mod context;
pub mod forwarder;
pub mod interceptors;
pub mod pipeline;
pub mod refresh_client;
pub mod response;

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Router,
    extract::{Request, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Url;
use tower_http::services::ServeDir;
use tracing::error;

use tokengate_auth::Role;
use tokengate_config::GatewayConfig;
use tokengate_core::AppError;

use crate::logging::logging_middleware;
use crate::modules::health::health;

pub use context::{RequestContext, TokenSlot};
pub use forwarder::{ForwardRequest, Forwarder, HttpForwarder};
pub use interceptors::{ApiProxy, AuthGate, RoleGate, TokenRefresh};
pub use pipeline::{Interceptor, PathPattern, Pipeline, Route, gateway_middleware, with_gateway};
pub use refresh_client::{HttpRefreshClient, RefreshClient};
pub use response::{Disposition, PipelineResponse};

const API_PREFIX: &str = "/api/";

/// Shared state of the gateway. Read-only after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub config: GatewayConfig,
    pub forwarder: Arc<dyn Forwarder>,
    pub pipeline: Arc<Pipeline>,
}

impl GatewayState {
    pub fn new(
        config: GatewayConfig,
        refresh_client: Arc<dyn RefreshClient>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Result<Self, regex::Error> {
        let pipeline = build_pipeline(&config, refresh_client, forwarder.clone())?;
        Ok(Self {
            config,
            forwarder,
            pipeline: Arc::new(pipeline),
        })
    }

    /// State wired to the real auth service and backend.
    pub fn from_config(config: GatewayConfig) -> anyhow::Result<Self> {
        let refresh_client = HttpRefreshClient::new(config.refresh_url(), config.refresh_timeout)?;
        let forwarder = HttpForwarder::new()?;
        Ok(Self::new(config, Arc::new(refresh_client), Arc::new(forwarder))?)
    }
}

/// The default route table.
pub fn build_pipeline(
    config: &GatewayConfig,
    refresh_client: Arc<dyn RefreshClient>,
    forwarder: Arc<dyn Forwarder>,
) -> Result<Pipeline, regex::Error> {
    let login_page = format!("^{}$", regex::escape(&config.login_path));

    Ok(Pipeline::new(vec![
        Route::new(
            "token_refresh",
            ".*",
            TokenRefresh::new(refresh_client, config.refresh_timeout),
        )?,
        Route::new("auth_gate", "^/admin", AuthGate::new(&config.login_path))?
            .excluding(&login_page)?,
        Route::new(
            "role_gate",
            "^/admin/(settings|users)",
            RoleGate::new(
                [Role::Admin],
                &config.login_path,
                &config.unauthorized_path,
            ),
        )?
        .excluding(&login_page)?,
        Route::new(
            "api_proxy",
            "^/api/",
            ApiProxy::new(API_PREFIX, config.api_url.clone(), forwarder),
        )?
        .excluding("^/api/(login|refresh-token|health)(/|$)")?,
    ]))
}

/// Relays login and refresh calls to the auth service unchanged, so the
/// cookies it sets land on the gateway's origin.
pub async fn relay_to_auth_service(State(state): State<GatewayState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    let target = format!(
        "{}{}",
        state.config.auth_service_url.trim_end_matches('/'),
        path_and_query
    );

    let url = match Url::parse(&target) {
        Ok(url) => url,
        Err(e) => {
            return AppError::internal(anyhow!("AUTH_SERVICE_URL is not a valid origin: {}", e))
                .into_response();
        }
    };

    let request = ForwardRequest {
        method: parts.method,
        url,
        headers: forwarder::forwardable_headers(&parts.headers),
        body,
    };

    match state.forwarder.forward(request).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Auth service unreachable");
            AppError::bad_gateway(err).into_response()
        }
    }
}

/// Gateway routes, static frontend fallback, and the pipeline in front of
/// all of them.
pub fn init_gateway_router(state: GatewayState) -> Router {
    let pipeline = state.pipeline.clone();
    let public_dir = ServeDir::new(&state.config.public_dir);

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(relay_to_auth_service))
        .route("/api/refresh-token", post(relay_to_auth_service))
        .fallback_service(public_dir)
        .with_state(state);

    with_gateway(app, pipeline).layer(middleware::from_fn(logging_middleware))
}
