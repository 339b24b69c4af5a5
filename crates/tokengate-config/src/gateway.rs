//! Edge gateway configuration.
//!
//! # Environment Variables
//!
//! - `API_URL`: Backend origin API requests are proxied to (no default; the
//!   proxy answers `500` while it is unset)
//! - `AUTH_SERVICE_URL`: Origin of the auth service (default: `http://localhost:3000`)
//! - `REFRESH_TIMEOUT_MS`: Upper bound on the refresh call (default: 5000)
//! - `LOGIN_PATH`: Where unauthenticated users are redirected (default: `/login`)
//! - `UNAUTHORIZED_PATH`: Where users with an insufficient role are redirected
//!   (default: `/unauthorized`)
//! - `PUBLIC_DIR`: Static frontend served behind the pipeline (default: `public`)

use std::env;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_url: Option<String>,
    pub auth_service_url: String,
    pub refresh_timeout: Duration,
    pub login_path: String,
    pub unauthorized_path: String,
    pub public_dir: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            auth_service_url: "http://localhost:3000".to_string(),
            refresh_timeout: Duration::from_millis(5000),
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

impl GatewayConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            auth_service_url: env::var("AUTH_SERVICE_URL").unwrap_or(defaults.auth_service_url),
            refresh_timeout: env::var("REFRESH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh_timeout),
            login_path: env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            unauthorized_path: env::var("UNAUTHORIZED_PATH").unwrap_or(defaults.unauthorized_path),
            public_dir: env::var("PUBLIC_DIR").unwrap_or(defaults.public_dir),
        }
    }

    /// Full URL of the auth service's refresh endpoint.
    pub fn refresh_url(&self) -> String {
        format!(
            "{}/api/refresh-token",
            self.auth_service_url.trim_end_matches('/')
        )
    }
}
