//! # Tokengate
//!
//! A token-gated edge gateway and the auth service behind it.
//!
//! ## Overview
//!
//! Clients hold two HttpOnly cookies: a short-lived `accessToken` and a
//! long-lived `refreshToken`. The gateway keeps the access token fresh,
//! guards the `/admin` pages, and forwards `/api/` calls to a backend with
//! the token attached as a bearer credential.
//!
//! ```text
//! browser ──► gateway (:3001) ──► backend (API_URL)
//!                 │
//!                 └──► auth service (:3000)  login / refresh / profile
//! ```
//!
//! ## Gateway pipeline
//!
//! | Stage | Paths | On failure |
//! |-------|-------|------------|
//! | token_refresh | all | clears `accessToken`, continues |
//! | auth_gate | `/admin` (not the login page) | `307` to `LOGIN_PATH` |
//! | role_gate | `/admin/settings`, `/admin/users` | `307` to `UNAUTHORIZED_PATH` |
//! | api_proxy | `/api/` (not login, refresh, health) | `500` unconfigured, `502` unreachable |
//!
//! The gateway only decodes tokens. Signatures are checked by the auth
//! service and by whatever backend receives the bearer token.
//!
//! ## Auth service
//!
//! - `POST /api/login`: verifies a bcrypt password and issues both tokens
//! - `GET /api/profile`: echoes the claims of a valid bearer token
//! - `POST /api/refresh-token`: issues a new access token from the cookie
//!
//! ## Modules
//!
//! - [`cookies`]: Token cookie names and attributes
//! - [`docs`]: OpenAPI documentation
//! - [`gateway`]: Interceptor pipeline, proxy and gateway router
//! - [`logging`]: Tracing setup and request logging
//! - [`middleware`]: Bearer token extractor
//! - [`modules`]: Auth service endpoints and health probe
//! - [`router`]: Auth service router
//! - [`state`]: Auth service state
//! - [`validator`]: Request validation

pub mod cookies;
pub mod docs;
pub mod gateway;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use tokengate_auth;
pub use tokengate_config;
pub use tokengate_core;
