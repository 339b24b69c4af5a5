//! # Tokengate Core
//!
//! Foundational types shared by the auth service and the gateway:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tokengate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("123456")?;
//! if !verify_password("123456", &hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("Wrong password")));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
