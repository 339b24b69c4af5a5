use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::Request;
use tokio::time::timeout;
use tracing::{debug, warn};

use tokengate_auth::codec;

use crate::cookies::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, read_cookie, removal_cookie, token_cookie,
};
use crate::gateway::context::{RequestContext, TokenSlot};
use crate::gateway::pipeline::Interceptor;
use crate::gateway::refresh_client::RefreshClient;
use crate::gateway::response::PipelineResponse;

/// Keeps the access token usable.
///
/// When the request carries a refresh token and the access token is missing
/// or expired, one refresh call is made. Failure clears the access cookie
/// and leaves the decision to later stages; this stage never redirects.
pub struct TokenRefresh {
    client: Arc<dyn RefreshClient>,
    timeout: Duration,
}

impl TokenRefresh {
    pub fn new(client: Arc<dyn RefreshClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Interceptor for TokenRefresh {
    async fn handle(
        &self,
        req: &mut Request,
        mut res: PipelineResponse,
        ctx: &mut RequestContext,
    ) -> PipelineResponse {
        let access_token = read_cookie(req.headers(), ACCESS_TOKEN_COOKIE);
        let refresh_token = read_cookie(req.headers(), REFRESH_TOKEN_COOKIE);
        ctx.refresh_token = refresh_token.clone();

        let Some(refresh_token) = refresh_token else {
            ctx.access_token = TokenSlot::from(access_token);
            return res;
        };

        if let Some(token) = access_token.filter(|token| !codec::is_expired(token)) {
            ctx.access_token = TokenSlot::Present(token);
            return res;
        }

        match timeout(self.timeout, self.client.refresh(&refresh_token)).await {
            Ok(Ok(token)) => {
                debug!(path = %req.uri().path(), "Access token refreshed");
                res.set_cookie(&token_cookie(ACCESS_TOKEN_COOKIE, token.clone()));
                ctx.access_token = TokenSlot::Present(token);
            }
            Ok(Err(err)) => {
                warn!(error = %err, path = %req.uri().path(), "Token refresh failed");
                res.set_cookie(&removal_cookie(ACCESS_TOKEN_COOKIE));
                ctx.access_token = TokenSlot::Missing;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    path = %req.uri().path(),
                    "Token refresh timed out"
                );
                res.set_cookie(&removal_cookie(ACCESS_TOKEN_COOKIE));
                ctx.access_token = TokenSlot::Missing;
            }
        }

        res
    }
}
