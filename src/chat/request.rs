use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::format::ResponseFormat;
use crate::core::{LlmError, Message};

/// Wire body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,

    /// Token id to bias, between -100 and 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<String, i32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,

    /// Output modalities, e.g. `["text", "audio"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            store: None,
            metadata: None,
            frequency_penalty: None,
            logit_bias: None,
            logprobs: None,
            modalities: None,
            response_format: None,
        }
    }
}

#[derive(Debug, Clone)]
enum ChatSource {
    Custom(ChatCompletionRequest),
    Content(Vec<Message>),
}

/// One chat completion call, either from a caller-built request or from messages that
/// get the client's default model.
#[derive(Debug, Clone)]
pub struct ChatCall {
    source: ChatSource,
    structured_output: bool,
    response_format: Option<ResponseFormat>,
}

impl ChatCall {
    /// Send `request` as given. A response format attached to the call replaces the
    /// request's own `response_format`.
    pub fn custom(request: ChatCompletionRequest) -> Self {
        Self {
            source: ChatSource::Custom(request),
            structured_output: false,
            response_format: None,
        }
    }

    /// Build the request from `messages` and the configured default model.
    pub fn content(messages: Vec<Message>) -> Self {
        Self {
            source: ChatSource::Content(messages),
            structured_output: false,
            response_format: None,
        }
    }

    /// Attach a structured-output envelope. Enables structured output.
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.structured_output = true;
        self.response_format = Some(format);
        self
    }

    /// Toggle structured output. Enabling it without a response format makes the call
    /// fail with [`LlmError::MissingArgument`].
    pub fn structured_output(mut self, enabled: bool) -> Self {
        self.structured_output = enabled;
        self
    }

    pub(crate) fn into_request(self, default_model: &str) -> Result<ChatCompletionRequest, LlmError> {
        let format = match (self.structured_output, self.response_format) {
            (true, None) => {
                return Err(LlmError::MissingArgument(
                    "Response format must be provided when structured output is enabled"
                        .to_string(),
                ));
            }
            (true, Some(format)) => Some(format),
            (false, _) => None,
        };

        let mut request = match self.source {
            ChatSource::Custom(request) => {
                if request.messages.is_empty() {
                    return Err(LlmError::MissingArgument(
                        "Custom request must contain at least one message".to_string(),
                    ));
                }
                request
            }
            ChatSource::Content(messages) => {
                if messages.is_empty() {
                    return Err(LlmError::MissingArgument(
                        "Content must contain at least one message".to_string(),
                    ));
                }
                ChatCompletionRequest::new(default_model, messages)
            }
        };

        if let Some(format) = format {
            request.response_format = Some(format);
        }

        Ok(request)
    }
}
