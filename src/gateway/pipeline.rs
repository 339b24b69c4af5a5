//! Ordered interceptor dispatch.
//!
//! A [`Pipeline`] owns a route table. For every request it walks the table in
//! declaration order, runs each interceptor whose matcher accepts the path,
//! and stops at the first terminal response.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use regex::Regex;
use tracing::debug;

use super::context::RequestContext;
use super::response::PipelineResponse;

/// One stage of the pipeline.
///
/// Interceptors hold no per-request state; everything a later stage needs is
/// written to the [`RequestContext`].
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn handle(
        &self,
        req: &mut Request,
        res: PipelineResponse,
        ctx: &mut RequestContext,
    ) -> PipelineResponse;
}

/// A regular expression over the request path.
#[derive(Debug, Clone)]
pub struct PathPattern(Regex);

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

pub struct Route {
    name: &'static str,
    matcher: PathPattern,
    excluded: Option<PathPattern>,
    interceptor: Arc<dyn Interceptor>,
}

impl Route {
    pub fn new<I>(name: &'static str, matcher: &str, interceptor: I) -> Result<Self, regex::Error>
    where
        I: Interceptor + 'static,
    {
        Ok(Self {
            name,
            matcher: PathPattern::new(matcher)?,
            excluded: None,
            interceptor: Arc::new(interceptor),
        })
    }

    pub fn excluding(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.excluded = Some(PathPattern::new(pattern)?);
        Ok(self)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Matched by `matcher` and not by `excluded`.
    pub fn applies_to(&self, path: &str) -> bool {
        self.matcher.matches(path)
            && !self
                .excluded
                .as_ref()
                .is_some_and(|excluded| excluded.matches(path))
    }
}

pub struct Pipeline {
    routes: Vec<Route>,
}

impl Pipeline {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn route_names(&self) -> Vec<&'static str> {
        self.routes.iter().map(Route::name).collect()
    }

    /// Names of the routes that would run for `path`, ignoring early exits.
    pub fn applicable_routes(&self, path: &str) -> Vec<&'static str> {
        self.routes
            .iter()
            .filter(|route| route.applies_to(path))
            .map(Route::name)
            .collect()
    }

    /// Runs every applicable interceptor against `req`.
    ///
    /// `Set-Cookie` headers gathered so far are re-applied to whatever
    /// response an interceptor returns, so a redirect keeps a cleared cookie.
    pub async fn run(&self, req: &mut Request) -> (PipelineResponse, RequestContext) {
        let path = req.uri().path().to_string();
        let mut ctx = RequestContext::default();
        let mut current = PipelineResponse::next();

        for route in &self.routes {
            if !route.applies_to(&path) {
                continue;
            }

            let cookies = current.set_cookies();
            let mut returned = route.interceptor.handle(req, current, &mut ctx).await;
            returned.carry_cookies(&cookies);
            current = returned;

            if current.is_terminal() {
                debug!(
                    interceptor = route.name,
                    path = %path,
                    status = current.status().as_u16(),
                    "Pipeline short-circuited"
                );
                break;
            }
        }

        (current, ctx)
    }
}

pub async fn gateway_middleware(
    State(pipeline): State<Arc<Pipeline>>,
    mut req: Request,
    next: Next,
) -> Response {
    let (response, _ctx) = pipeline.run(&mut req).await;
    response.finish(req, next).await
}

/// Puts `pipeline` in front of every route of `app`.
pub fn with_gateway<S>(app: Router<S>, pipeline: Arc<Pipeline>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    app.layer(middleware::from_fn_with_state(pipeline, gateway_middleware))
}
