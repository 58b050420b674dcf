//! HTTP transport seam
//!
//! Every dashboard API request goes through [`HttpTransport`], so tests can
//! substitute canned responses for the real `reqwest` client.

use super::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response carrying a JSON body
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the dashboard backend
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse, FetchError>;
}

/// `reqwest` backed transport
///
/// The request timeout applies per call; the shared client only bounds
/// connection setup, so long-lived streams on it stay open.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Underlying client, shared with the event stream and OIDC exchanges
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse, FetchError> {
        let resp = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            detail: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}
