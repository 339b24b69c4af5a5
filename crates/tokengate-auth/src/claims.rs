//! Token payload structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload carried by access and refresh tokens.
///
/// `iat` and `exp` are Unix seconds. They are optional so that a structurally
/// valid payload without an expiry can still be decoded and then judged
/// expired by [`crate::codec::is_expired`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub id: u64,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

/// The identity a token asserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: String,
}
