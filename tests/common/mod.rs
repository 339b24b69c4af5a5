#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use tokio::net::TcpListener;

use tokengate::gateway::{ForwardRequest, Forwarder, RefreshClient};
use tokengate::modules::auth::store::{UserRecord, UserStore};
use tokengate::router::init_router;
use tokengate::state::AppState;
use tokengate_auth::{Role, User, create_access_token, create_refresh_token};
use tokengate_config::{CorsConfig, JwtConfig};
use tokengate_core::hash_password;

pub const ADMIN_PASSWORD: &str = "123456";
pub const USER_PASSWORD: &str = "user-pass";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret-at-least-32-characters".to_string(),
        refresh_secret: "test-refresh-secret-at-least-32-characters".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

/// Store with `admin` (id 1, admin) and `jane` (id 2, user).
pub fn test_users() -> UserStore {
    UserStore::new(vec![
        UserRecord {
            id: 1,
            username: "admin".to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            role: Role::Admin,
        },
        UserRecord {
            id: 2,
            username: "jane".to_string(),
            password_hash: hash_password(USER_PASSWORD).unwrap(),
            role: Role::User,
        },
    ])
}

pub fn test_state() -> AppState {
    AppState {
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        },
        users: Arc::new(test_users()),
    }
}

pub fn auth_app() -> Router {
    init_router(test_state())
}

pub fn user(id: u64, username: &str, role: Role) -> User {
    User {
        id,
        username: username.to_string(),
        role: role.to_string(),
    }
}

pub fn admin() -> User {
    user(1, "admin", Role::Admin)
}

pub fn jane() -> User {
    user(2, "jane", Role::User)
}

pub fn access_token(user: &User) -> String {
    create_access_token(user, &test_jwt_config()).unwrap()
}

pub fn expired_access_token(user: &User) -> String {
    let config = JwtConfig {
        access_token_expiry: -3600,
        ..test_jwt_config()
    };
    create_access_token(user, &config).unwrap()
}

pub fn refresh_token(user: &User) -> String {
    create_refresh_token(user, &test_jwt_config()).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Serves `app` on an ephemeral local port.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Refresh client answering from a fixed script.
pub struct StubRefreshClient {
    reply: Option<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubRefreshClient {
    pub fn returning(token: String) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(token),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RefreshClient for StubRefreshClient {
    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(refresh_token.to_string());
        match &self.reply {
            Some(token) => Ok(token.clone()),
            None => bail!("refresh endpoint answered 403 Forbidden"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Forwarded {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Forwarder that records requests and answers `200 {"proxied":true}`,
/// optionally with `Set-Cookie` headers.
#[derive(Default)]
pub struct RecordingForwarder {
    requests: Mutex<Vec<Forwarded>>,
    set_cookies: Vec<String>,
}

impl RecordingForwarder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn setting_cookies(cookies: &[String]) -> Arc<Self> {
        Arc::new(Self {
            set_cookies: cookies.to_vec(),
            ..Self::default()
        })
    }

    pub fn requests(&self) -> Vec<Forwarded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn forward(&self, request: ForwardRequest) -> anyhow::Result<Response> {
        let body = to_bytes(request.body, usize::MAX).await?;
        self.requests.lock().unwrap().push(Forwarded {
            method: request.method,
            url: request.url.to_string(),
            headers: request.headers,
            body: body.to_vec(),
        });
        let mut response = (
            StatusCode::OK,
            [("content-type", "application/json"), ("x-backend", "yes")],
            r#"{"proxied":true}"#,
        )
            .into_response();
        for cookie in &self.set_cookies {
            response
                .headers_mut()
                .append(header::SET_COOKIE, HeaderValue::from_str(cookie)?);
        }
        Ok(response)
    }
}

pub fn empty_request(method: Method, uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
