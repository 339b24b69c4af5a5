use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::Cookie;

use tokengate_core::AppError;

use crate::cookies::{append_set_cookie, set_cookie_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the request through to the downstream service.
    Continue,
    /// The request was answered by another origin.
    Rewrite,
    Redirect,
    Error,
}

/// The response an interceptor hands back to the dispatcher.
///
/// A `Continue` response has no body of its own; its headers are merged into
/// whatever the downstream service answers.
#[derive(Debug)]
pub struct PipelineResponse {
    disposition: Disposition,
    response: Response,
}

impl PipelineResponse {
    pub fn next() -> Self {
        Self {
            disposition: Disposition::Continue,
            response: Response::new(Body::empty()),
        }
    }

    /// A `307 Temporary Redirect` to `location`.
    pub fn redirect(location: &str) -> Self {
        Self {
            disposition: Disposition::Redirect,
            response: Redirect::temporary(location).into_response(),
        }
    }

    pub fn error(err: AppError) -> Self {
        Self {
            disposition: Disposition::Error,
            response: err.into_response(),
        }
    }

    pub fn rewrite(response: Response) -> Self {
        Self {
            disposition: Disposition::Rewrite,
            response,
        }
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Redirects and errors stop the chain.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.disposition,
            Disposition::Redirect | Disposition::Error
        )
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn location(&self) -> Option<&str> {
        self.response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn set_cookie(&mut self, cookie: &Cookie<'_>) {
        append_set_cookie(self.response.headers_mut(), cookie);
    }

    pub fn set_cookies(&self) -> Vec<HeaderValue> {
        self.response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .cloned()
            .collect()
    }

    /// Re-applies `Set-Cookie` values from the response this one replaced.
    ///
    /// A cookie this response already sets keeps its own value.
    pub(crate) fn carry_cookies(&mut self, cookies: &[HeaderValue]) {
        merge_headers(
            self.response.headers_mut(),
            cookies
                .iter()
                .map(|cookie| (header::SET_COOKIE, cookie.clone())),
        );
    }

    /// Produces the final response: runs `next` for a `Continue` and merges
    /// the accumulated headers into its answer, otherwise returns as-is.
    ///
    /// Cookies set by the downstream service win over cookies of the same
    /// name set by the pipeline.
    pub async fn finish(self, req: Request, next: Next) -> Response {
        match self.disposition {
            Disposition::Continue => {
                let mut response = next.run(req).await;
                merge_headers(
                    response.headers_mut(),
                    self.response
                        .headers()
                        .iter()
                        .map(|(name, value)| (name.clone(), value.clone())),
                );
                response
            }
            _ => self.response,
        }
    }
}

/// Appends `extra` to `target`, skipping `Set-Cookie` values for cookies
/// `target` already sets.
fn merge_headers(
    target: &mut HeaderMap,
    extra: impl IntoIterator<Item = (HeaderName, HeaderValue)>,
) {
    let owned: Vec<String> = target
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(set_cookie_name)
        .collect();

    for (name, value) in extra {
        if name == header::SET_COOKIE
            && set_cookie_name(&value).is_some_and(|cookie| owned.contains(&cookie))
        {
            continue;
        }
        target.append(name, value);
    }
}
