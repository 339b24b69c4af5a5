use async_trait::async_trait;
use axum::extract::Request;
use tracing::debug;

use tokengate_auth::codec;

use crate::gateway::context::RequestContext;
use crate::gateway::pipeline::Interceptor;
use crate::gateway::response::PipelineResponse;

/// Sends requests without a usable access token to the login page.
///
/// The token is only decoded, not verified; the auth service checks the
/// signature on every call the token is later used for.
pub struct AuthGate {
    login_path: String,
}

impl AuthGate {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

#[async_trait]
impl Interceptor for AuthGate {
    async fn handle(
        &self,
        req: &mut Request,
        res: PipelineResponse,
        ctx: &mut RequestContext,
    ) -> PipelineResponse {
        let claims = ctx
            .access_token_or_cookie(req.headers())
            .filter(|token| !codec::is_expired(token))
            .and_then(|token| codec::decode(&token));

        match claims {
            Some(claims) => {
                ctx.user = Some(claims.user());
                res
            }
            None => {
                debug!(path = %req.uri().path(), "No valid access token, redirecting to login");
                PipelineResponse::redirect(&self.login_path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::context::TokenSlot;
    use crate::gateway::interceptors::test_support::token;
    use axum::body::Body;

    fn request(cookie: Option<String>) -> Request {
        let mut builder = Request::builder().uri("/admin");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn run(ctx: &mut RequestContext, cookie: Option<String>) -> PipelineResponse {
        AuthGate::new("/login")
            .handle(&mut request(cookie), PipelineResponse::next(), ctx)
            .await
    }

    #[tokio::test]
    async fn test_valid_context_token_sets_user() {
        let mut ctx = RequestContext {
            access_token: TokenSlot::Present(token("admin", 600)),
            ..RequestContext::default()
        };
        let res = run(&mut ctx, None).await;

        assert!(!res.is_terminal());
        let user = ctx.user.unwrap();
        assert_eq!(user.username, "tester");
        assert_eq!(user.role, "admin");
    }

    #[tokio::test]
    async fn test_falls_back_to_cookie_when_unresolved() {
        let mut ctx = RequestContext::default();
        let res = run(&mut ctx, Some(format!("accessToken={}", token("user", 600)))).await;

        assert!(!res.is_terminal());
        assert_eq!(ctx.user.unwrap().role, "user");
    }

    #[tokio::test]
    async fn test_missing_token_redirects_to_login() {
        let mut ctx = RequestContext::default();
        let res = run(&mut ctx, None).await;

        assert!(res.is_terminal());
        assert_eq!(res.location(), Some("/login"));
        assert!(ctx.user.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_redirects_to_login() {
        let mut ctx = RequestContext {
            access_token: TokenSlot::Present(token("admin", -5)),
            ..RequestContext::default()
        };
        let res = run(&mut ctx, None).await;

        assert_eq!(res.location(), Some("/login"));
    }

    #[tokio::test]
    async fn test_undecodable_token_redirects_to_login() {
        let mut ctx = RequestContext::default();
        let res = run(&mut ctx, Some("accessToken=a.b".to_string())).await;

        assert_eq!(res.location(), Some("/login"));
    }

    #[tokio::test]
    async fn test_missing_slot_ignores_cookie() {
        let mut ctx = RequestContext {
            access_token: TokenSlot::Missing,
            ..RequestContext::default()
        };
        let res = run(&mut ctx, Some(format!("accessToken={}", token("admin", 600)))).await;

        assert_eq!(res.location(), Some("/login"));
    }
}
