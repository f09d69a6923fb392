use async_trait::async_trait;

use super::{
    error::LlmError,
    http::{HttpRequest, HttpResponse},
};

/// Performs one authenticated HTTP exchange.
///
/// Implementations must be safe to share between concurrent calls. A non-success
/// status is reported as [`LlmError::Transport`]; the body of a successful response is
/// returned whole.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, LlmError>;
}
