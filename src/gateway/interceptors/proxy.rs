use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, Uri, header},
};
use reqwest::Url;
use tracing::{debug, error, warn};

use tokengate_core::AppError;

use crate::gateway::context::RequestContext;
use crate::gateway::forwarder::{ForwardRequest, Forwarder, forwardable_headers};
use crate::gateway::pipeline::Interceptor;
use crate::gateway::response::PipelineResponse;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Forwards API calls to the backend origin with the caller's access token
/// attached as a bearer credential.
pub struct ApiProxy {
    prefix: String,
    backend_origin: Option<String>,
    forwarder: Arc<dyn Forwarder>,
}

impl ApiProxy {
    pub fn new(
        prefix: impl Into<String>,
        backend_origin: Option<String>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            backend_origin,
            forwarder,
        }
    }

    /// Backend URL for `uri`: the path minus the prefix, appended to the
    /// origin, with the query string kept as sent.
    ///
    /// The query goes through URL serialization, so characters outside the
    /// query encode set (`'`, space, `"`) arrive percent-encoded. Paths whose
    /// dot segments, plain or percent-encoded, would leave the origin's base
    /// path are rejected with `400`.
    pub fn target_url(&self, uri: &Uri) -> Result<Url, AppError> {
        let origin = self
            .backend_origin
            .as_deref()
            .ok_or_else(|| AppError::internal(anyhow!("API_URL is not configured")))?;
        let base = Url::parse(origin)
            .map_err(|e| AppError::internal(anyhow!("API_URL is not a valid origin: {}", e)))?;
        let base_path = base.path().trim_end_matches('/');

        let path = uri.path();
        let rest = path.strip_prefix(self.prefix.as_str()).unwrap_or(path);
        let mut target = format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            rest.trim_start_matches('/')
        );
        if let Some(query) = uri.query() {
            target.push('?');
            target.push_str(query);
        }

        let url = Url::parse(&target)
            .map_err(|e| AppError::bad_request(anyhow!("Invalid API path: {}", e)))?;

        let inside_base = url.path() == base_path
            || url
                .path()
                .strip_prefix(base_path)
                .is_some_and(|rest| rest.starts_with('/'));
        if url.origin() != base.origin() || !inside_base {
            return Err(AppError::bad_request(anyhow!(
                "API path escapes the backend base path"
            )));
        }

        Ok(url)
    }
}

/// Context first, then the `accessToken` cookie, then the
/// `x-access-token` header, then an incoming bearer header.
///
/// A context slot resolved to `Missing` skips the cookie, which at that
/// point holds a token the refresh stage already gave up on.
pub fn resolve_bearer(headers: &HeaderMap, ctx: &RequestContext) -> Option<String> {
    ctx.access_token_or_cookie(headers)
        .or_else(|| header_value(headers, ACCESS_TOKEN_HEADER))
        .or_else(|| {
            header_value(headers, header::AUTHORIZATION.as_str())
                .and_then(|value| value.strip_prefix("Bearer ").map(str::to_string))
        })
        .filter(|token| !token.is_empty())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Headers sent to the backend.
pub fn outgoing_headers(method: &Method, headers: &HeaderMap, token: Option<&str>) -> HeaderMap {
    let mut outgoing = forwardable_headers(headers);

    if let Some(value) = token.and_then(|t| HeaderValue::from_str(&format!("Bearer {}", t)).ok()) {
        outgoing.insert(header::AUTHORIZATION, value);
    }

    if method != Method::GET && !outgoing.contains_key(header::CONTENT_TYPE) {
        outgoing.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
    }

    outgoing
}

#[async_trait]
impl Interceptor for ApiProxy {
    async fn handle(
        &self,
        req: &mut Request,
        _res: PipelineResponse,
        ctx: &mut RequestContext,
    ) -> PipelineResponse {
        let url = match self.target_url(req.uri()) {
            Ok(url) => url,
            Err(err) if err.status.is_server_error() => {
                error!(error = %err.error, path = %req.uri().path(), "Proxy misconfigured");
                return PipelineResponse::error(err);
            }
            Err(err) => {
                warn!(error = %err.error, path = %req.uri().path(), "Proxy target rejected");
                return PipelineResponse::error(err);
            }
        };

        let token = resolve_bearer(req.headers(), ctx);
        let headers = outgoing_headers(req.method(), req.headers(), token.as_deref());
        let body = std::mem::take(req.body_mut());

        debug!(
            method = %req.method(),
            path = %req.uri().path(),
            target = %url,
            bearer = token.is_some(),
            "Proxying API request"
        );

        let forward = ForwardRequest {
            method: req.method().clone(),
            url,
            headers,
            body,
        };

        match self.forwarder.forward(forward).await {
            Ok(response) => PipelineResponse::rewrite(response),
            Err(err) => {
                error!(error = %err, path = %req.uri().path(), "Backend request failed");
                PipelineResponse::error(AppError::bad_gateway(err))
            }
        }
    }
}
