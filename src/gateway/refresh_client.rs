use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::Deserialize;

use crate::cookies::REFRESH_TOKEN_COOKIE;

/// Exchanges a refresh token for a fresh access token.
#[async_trait]
pub trait RefreshClient: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<String>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshReply {
    access_token: Option<String>,
}

/// Calls the auth service's `/api/refresh-token` endpoint, passing the
/// refresh token as a cookie.
#[derive(Debug, Clone)]
pub struct HttpRefreshClient {
    client: reqwest::Client,
    url: String,
}

impl HttpRefreshClient {
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build refresh client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl RefreshClient for HttpRefreshClient {
    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header(COOKIE, format!("{}={}", REFRESH_TOKEN_COOKIE, refresh_token))
            .send()
            .await
            .context("Refresh request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Refresh endpoint answered {}", status);
        }

        let reply: RefreshReply = response
            .json()
            .await
            .context("Refresh reply was not JSON")?;

        reply
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("Refresh reply carried no access token"))
    }
}
