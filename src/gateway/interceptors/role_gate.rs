use async_trait::async_trait;
use axum::extract::Request;
use tracing::debug;

use tokengate_auth::Role;

use crate::gateway::context::RequestContext;
use crate::gateway::pipeline::Interceptor;
use crate::gateway::response::PipelineResponse;

/// Admits only users whose role is in `permitted`. Expects the auth gate to
/// have run first; a request with no user is sent to the login page.
pub struct RoleGate {
    permitted: Vec<Role>,
    login_path: String,
    unauthorized_path: String,
}

impl RoleGate {
    pub fn new(
        permitted: impl IntoIterator<Item = Role>,
        login_path: impl Into<String>,
        unauthorized_path: impl Into<String>,
    ) -> Self {
        Self {
            permitted: permitted.into_iter().collect(),
            login_path: login_path.into(),
            unauthorized_path: unauthorized_path.into(),
        }
    }

    fn permits(&self, role: &str) -> bool {
        role.parse::<Role>()
            .is_ok_and(|role| self.permitted.contains(&role))
    }
}

#[async_trait]
impl Interceptor for RoleGate {
    async fn handle(
        &self,
        req: &mut Request,
        res: PipelineResponse,
        ctx: &mut RequestContext,
    ) -> PipelineResponse {
        let Some(user) = &ctx.user else {
            return PipelineResponse::redirect(&self.login_path);
        };

        if self.permits(&user.role) {
            res
        } else {
            debug!(
                path = %req.uri().path(),
                username = %user.username,
                role = %user.role,
                "Role not permitted"
            );
            PipelineResponse::redirect(&self.unauthorized_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tokengate_auth::User;

    fn ctx_with_role(role: &str) -> RequestContext {
        RequestContext {
            user: Some(User {
                id: 7,
                username: "someone".to_string(),
                role: role.to_string(),
            }),
            ..RequestContext::default()
        }
    }

    async fn run(ctx: &mut RequestContext) -> PipelineResponse {
        let mut req = Request::builder()
            .uri("/admin/settings")
            .body(Body::empty())
            .unwrap();
        RoleGate::new([Role::Admin], "/login", "/unauthorized")
            .handle(&mut req, PipelineResponse::next(), ctx)
            .await
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let res = run(&mut ctx_with_role("admin")).await;
        assert!(!res.is_terminal());
    }

    #[tokio::test]
    async fn test_user_is_unauthorized() {
        let res = run(&mut ctx_with_role("user")).await;
        assert_eq!(res.location(), Some("/unauthorized"));
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthorized() {
        let res = run(&mut ctx_with_role("superuser")).await;
        assert_eq!(res.location(), Some("/unauthorized"));
    }

    #[tokio::test]
    async fn test_no_user_redirects_to_login() {
        let res = run(&mut RequestContext::default()).await;
        assert_eq!(res.location(), Some("/login"));
    }
}
