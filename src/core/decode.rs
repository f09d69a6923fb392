//! Response decoding and classification of errors reported inside successful responses.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use super::error::LlmError;

/// Error object the provider embeds in a response body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    /// Sent as a number by some endpoints and as a string by others.
    #[serde(default)]
    pub code: Option<Value>,
}

impl ApiErrorBody {
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    pub fn to_error(&self) -> LlmError {
        LlmError::Provider {
            message: self.message.clone(),
            error_type: self.error_type.clone(),
            param: self.param.clone(),
            code: self.code.as_ref().and_then(|code| match code {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Implemented by responses that carry an `error` sub-object next to their payload.
pub(crate) trait InBandError {
    fn in_band_error(&self) -> Option<&ApiErrorBody>;
}

/// Decode a JSON body into `T`.
///
/// A body that does not match `T` but is an `{"error": {...}}` envelope is reported as
/// [`LlmError::Provider`]; anything else is [`LlmError::Decode`].
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, LlmError> {
    serde_json::from_slice(body).map_err(|e| {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.is_empty() => envelope.error.to_error(),
            _ => LlmError::decode(format!("Failed to decode {what} response"), e),
        }
    })
}

/// Decode a JSON body and fail if its embedded error object has a message, even though
/// the exchange itself succeeded.
pub(crate) fn decode_checked<T>(body: &[u8], what: &str) -> Result<T, LlmError>
where
    T: DeserializeOwned + InBandError,
{
    let decoded: T = decode_json(body, what)?;

    if let Some(error) = decoded.in_band_error().filter(|e| !e.is_empty()) {
        tracing::debug!(message = %error.message, "Provider reported an in-band error");
        return Err(error.to_error());
    }

    Ok(decoded)
}
