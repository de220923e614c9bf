//! HTTP transport seam
//!
//! The runner only sees the [`Transport`] trait. [`HttpTransport`] is the
//! real network client; tests substitute their own implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use crate::common::config::HttpConfig;
use crate::common::{Error, Result};

use super::request::OutboundRequest;

/// Raw response as seen by the evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Send a request, get a response
///
/// Implementations are shared by every in-flight scenario and must be safe
/// for concurrent use. Non-2xx statuses are responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &OutboundRequest) -> Result<TransportResponse>;
}

/// Transport backed by a single pooled `reqwest::Client`
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client once; it is reused for every request
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| Error::Transport(format!("Invalid method '{}': {}", request.method, e)))?;
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| Error::Transport(format!("Invalid URL '{}': {}", request.url, e)))?;

        let mut builder = self.client.request(method, url);
        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::Transport(format!("Invalid header name `{key}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Transport(format!("Invalid header value for `{key}`: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {e}")))?;

        tracing::debug!(status, bytes = body.len(), url = %request.url, "Received response");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
