//! Shared HTTP transport for all operations.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, header::CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, warn};

use super::error::LlmError;
use super::multipart::MultipartBody;
use super::traits::Transport;

/// Configuration for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Deadline for a whole exchange, including reading the body
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Bytes),
    Multipart(MultipartBody),
}

impl RequestBody {
    /// Serialize a request payload into a JSON body.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, LlmError> {
        let bytes = serde_json::to_vec(payload).map_err(|e| {
            LlmError::InvalidArgument(format!("Failed to serialize request body: {e}"))
        })?;
        Ok(RequestBody::Json(Bytes::from(bytes)))
    }

    /// Content type for JSON bodies. Multipart bodies get theirs, boundary included,
    /// from the form itself.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Multipart(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer_token: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("bearer_token", &"[REDACTED]")
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// reqwest-backed [`Transport`]. The inner client pools connections, so one instance
/// should be shared by all calls.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, LlmError> {
        let default_ua = format!("oaiwire/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| LlmError::Transport {
                message: "Failed to build reqwest client".to_string(),
                status_code: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[tracing::instrument(
        name = "http_exchange",
        skip(self, request),
        fields(method = %request.method, url = %request.url),
        err
    )]
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, LlmError> {
        if request.bearer_token.is_empty() {
            return Err(LlmError::Auth("API key is empty".to_string()));
        }

        let mut req_builder = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(&request.bearer_token);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(content_type) = request.body.content_type() {
            req_builder = req_builder.header(CONTENT_TYPE, content_type);
        }

        req_builder = match request.body {
            RequestBody::Json(bytes) => req_builder.body(bytes),
            RequestBody::Multipart(body) => req_builder.multipart(body.into_form()),
        };

        let res = req_builder.send().await.map_err(|e| LlmError::Transport {
            message: if e.is_timeout() {
                "Request timed out".to_string()
            } else {
                "Failed to send request".to_string()
            },
            status_code: None,
            source: Some(Box::new(e)),
        })?;

        let status = res.status();

        if !status.is_success() {
            // Drained so the pooled connection can be reused.
            let drained = res.bytes().await.map(|b| b.len()).unwrap_or_default();
            warn!(status = %status, drained, "API returned error status");

            return Err(LlmError::Transport {
                message: format!("Failed to send request: {status}"),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        let body = res.bytes().await.map_err(|e| LlmError::Transport {
            message: "Failed to read response body".to_string(),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        debug!(status = %status, bytes = body.len(), "HTTP request successful");

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
