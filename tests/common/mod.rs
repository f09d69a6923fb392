#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use oaiwire::core::{HttpRequest, HttpResponse};
use oaiwire::{LlmError, OpenAiClient, OpenAiConfig, Transport};
use tracing_subscriber::EnvFilter;

/// Transport that records every request and answers with a canned body.
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    body: Bytes,
}

impl RecordingTransport {
    pub fn new(body: impl Into<Bytes>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            body: body.into(),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: 200,
            body: self.body.clone(),
        })
    }
}

pub fn spy_client(api_key: &str, transport: Arc<RecordingTransport>) -> OpenAiClient {
    OpenAiClient::with_transport(OpenAiConfig::new(api_key), transport)
}

pub fn mock_client(base_url: String) -> OpenAiClient {
    init_tracing();
    OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url(base_url))
        .expect("Failed to create client")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
