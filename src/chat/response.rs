use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::core::{ChatRole, LlmError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,

    /// This is always `chat.completion`
    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub created: i64,

    pub model: String,

    #[serde(default)]
    pub system_fingerprint: Option<String>,

    pub choices: Vec<Choice>,

    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Message of the first choice, for callers that do not need the envelope.
    pub fn first_message(&self) -> Result<&AssistantMessage, LlmError> {
        self.choices
            .first()
            .map(|choice| &choice.message)
            .ok_or_else(|| LlmError::Decode {
                message: "No choices in response".to_string(),
                source: None,
            })
    }

    pub fn into_first_message(self) -> Result<AssistantMessage, LlmError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::Decode {
                message: "No choices in response".to_string(),
                source: None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    #[serde(default)]
    pub logprobs: Option<Value>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: ChatRole,

    #[serde(default)]
    pub content: Option<String>,

    /// The refusal explanation from the model.
    #[serde(default)]
    pub refusal: Option<String>,

    /// Present when audio output was requested through `modalities`
    #[serde(default)]
    pub audio: Option<AudioOutput>,
}

impl AssistantMessage {
    /// Parse the message text as JSON, as produced under a structured-output format.
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, LlmError> {
        if let Some(refusal) = self.refusal.as_deref().filter(|r| !r.is_empty()) {
            return Err(LlmError::Provider {
                message: format!("Model refused: {refusal}"),
                error_type: Some("refusal".to_string()),
                param: None,
                code: None,
            });
        }

        let text = self.content.as_deref().ok_or_else(|| LlmError::Decode {
            message: "No content in message".to_string(),
            source: None,
        })?;

        serde_json::from_str(text)
            .map_err(|e| LlmError::decode("Failed to parse structured output", e))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOutput {
    pub id: String,
    pub expires_at: i64,
    /// Base64 encoded audio
    pub data: String,
    pub transcript: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    #[serde(default)]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: u32,
}
