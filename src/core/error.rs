use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// A required argument was absent or empty.
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// A value is outside its enumerated set, or mutually exclusive options were combined.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric value is outside its allowed bounds.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-success HTTP status, network failure or timeout.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered with a well-formed body that describes a failure.
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        error_type: Option<String>,
        param: Option<String>,
        code: Option<String>,
    },
}

impl LlmError {
    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        LlmError::Io {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn decode(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status carried by a transport failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Transport { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_only_for_transport_errors() {
        let rejected = LlmError::Transport {
            message: "Failed to send request: 429 Too Many Requests".to_string(),
            status_code: Some(429),
            source: None,
        };
        assert_eq!(rejected.status_code(), Some(429));

        let timed_out = LlmError::Transport {
            message: "Request timed out".to_string(),
            status_code: None,
            source: None,
        };
        assert_eq!(timed_out.status_code(), None);
        assert_eq!(LlmError::Auth("API key is empty".to_string()).status_code(), None);
    }
}
