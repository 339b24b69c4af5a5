use axum::http::HeaderMap;

use tokengate_auth::User;

use crate::cookies::{ACCESS_TOKEN_COOKIE, read_cookie};

/// What the pipeline currently knows about the access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenSlot {
    /// No interceptor has looked at the token yet.
    #[default]
    Unresolved,
    /// An interceptor looked and found no usable token.
    Missing,
    Present(String),
}

impl TokenSlot {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            TokenSlot::Present(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, TokenSlot::Unresolved)
    }
}

impl From<Option<String>> for TokenSlot {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(token) => TokenSlot::Present(token),
            None => TokenSlot::Missing,
        }
    }
}

/// Per-request state threaded through the interceptor chain.
///
/// Created empty for every request and dropped with it. Fields that are
/// `Unresolved`/`None` have simply not been filled in yet.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub access_token: TokenSlot,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

impl RequestContext {
    /// The access token from context once resolved, otherwise the
    /// `accessToken` cookie of the request.
    pub fn access_token_or_cookie(&self, headers: &HeaderMap) -> Option<String> {
        if self.access_token.is_resolved() {
            self.access_token.as_deref().map(str::to_string)
        } else {
            read_cookie(headers, ACCESS_TOKEN_COOKIE)
        }
    }
}
