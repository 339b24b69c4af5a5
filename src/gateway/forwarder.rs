use anyhow::Context;
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{HeaderMap, Method, header},
    response::Response,
};
use reqwest::{Url, redirect::Policy};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers never copied onto an outgoing request.
const SKIPPED_REQUEST_HEADERS: [header::HeaderName; 3] =
    [header::HOST, header::CONNECTION, header::CONTENT_LENGTH];

/// Framing headers never copied back from the backend.
const SKIPPED_RESPONSE_HEADERS: [header::HeaderName; 2] =
    [header::TRANSFER_ENCODING, header::CONNECTION];

#[derive(Debug)]
pub struct ForwardRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Sends a request to another origin and returns its answer unchanged.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, request: ForwardRequest) -> anyhow::Result<Response>;
}

/// `headers` without `host`, `connection` and `content-length`.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in &SKIPPED_REQUEST_HEADERS {
        forwarded.remove(name);
    }
    forwarded
}

#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .context("Failed to build forwarding client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, request: ForwardRequest) -> anyhow::Result<Response> {
        let body = to_bytes(request.body, MAX_BODY_BYTES)
            .await
            .context("Failed to read request body")?;

        let upstream = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(body)
            .send()
            .await
            .context("Backend unreachable")?;

        let status = upstream.status();
        let mut headers = upstream.headers().clone();
        for name in &SKIPPED_RESPONSE_HEADERS {
            headers.remove(name);
        }
        let bytes = upstream
            .bytes()
            .await
            .context("Failed to read backend response")?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
