//! # Tokengate Auth
//!
//! Token types and utilities shared by the auth service and the gateway.
//!
//! - [`claims`]: The payload carried by both tokens and the user it describes
//! - [`roles`]: The closed set of roles a claim can name
//! - [`jwt`]: Signing and cryptographic verification (auth service only)
//! - [`codec`]: Structural decoding and expiry checks (gateway edge)
//!
//! # Trust boundary
//!
//! The gateway never sees the signing secrets. It only uses [`codec`], which
//! reads a token's payload without checking the signature, so every decision
//! it makes from a token is advisory. The auth service, through [`jwt`], is
//! the only component that verifies signatures.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_auth::{codec, create_access_token, verify_access_token};
//!
//! let token = create_access_token(&user, &jwt_config)?;
//! assert!(!codec::is_expired(&token));
//! let claims = verify_access_token(&token, &jwt_config)?;
//! ```

pub mod claims;
pub mod codec;
pub mod jwt;
pub mod roles;

pub use claims::{Claims, User};
pub use jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
};
pub use roles::Role;
