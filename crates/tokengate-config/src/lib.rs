//! # Tokengate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing secrets and lifetimes
//! - [`gateway`]: Edge gateway wiring (backend origin, auth service, paths)
//! - [`cors`]: CORS configuration for the auth service
//! - [`seed`]: The single seeded account of the credential store
//! - [`duration`]: Duration strings such as `15m` or `7d`
//!
//! # Example
//!
//! ```ignore
//! use tokengate_config::{GatewayConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let gateway_config = GatewayConfig::from_env();
//! ```

pub mod cors;
pub mod duration;
pub mod gateway;
pub mod jwt;
pub mod seed;

pub use cors::CorsConfig;
pub use duration::parse_duration_secs;
pub use gateway::GatewayConfig;
pub use jwt::JwtConfig;
pub use seed::SeedConfig;
