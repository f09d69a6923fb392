use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::core::LlmError;

pub const SPEECH_MODELS: [&str; 2] = ["tts-1", "tts-1-hd"];
pub const SPEECH_VOICES: [&str; 6] = ["alloy", "echo", "fable", "onyx", "nova", "shimmer"];
pub const SPEECH_FORMATS: [&str; 6] = ["mp3", "opus", "aac", "flac", "wav", "pcm"];

const MIN_SPEED: f64 = 0.25;
const MAX_SPEED: f64 = 4.0;
const DEFAULT_FORMAT: &str = "mp3";

/// Wire body of `POST /audio/speech`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,

    /// 0.25 to 4.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl SpeechRequest {
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            voice: None,
            response_format: None,
            speed: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        if !SPEECH_MODELS.contains(&self.model.as_str()) {
            return Err(LlmError::InvalidArgument(format!(
                "Invalid speech model '{}', expected one of: {}",
                self.model,
                SPEECH_MODELS.join(", ")
            )));
        }

        if self.input.is_empty() {
            return Err(LlmError::InvalidArgument(
                "Speech input must not be empty".to_string(),
            ));
        }

        if let Some(voice) = self.voice.as_deref() {
            if !SPEECH_VOICES.contains(&voice) {
                return Err(LlmError::InvalidArgument(format!(
                    "Invalid voice '{voice}', expected one of: {}",
                    SPEECH_VOICES.join(", ")
                )));
            }
        }

        if let Some(format) = self.response_format.as_deref() {
            if !SPEECH_FORMATS.contains(&format) {
                return Err(LlmError::InvalidArgument(format!(
                    "Invalid speech format '{format}', expected one of: {}",
                    SPEECH_FORMATS.join(", ")
                )));
            }
        }

        if let Some(speed) = self.speed {
            if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
                return Err(LlmError::OutOfRange(format!(
                    "speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
                )));
            }
        }

        Ok(())
    }

    /// File extension of the audio this request produces, dot included.
    pub fn extension(&self) -> String {
        format!(
            ".{}",
            self.response_format.as_deref().unwrap_or(DEFAULT_FORMAT)
        )
    }
}

/// Synthesized audio, base64 encoded, with the extension matching its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub b64_audio: String,
    pub extension: String,
}

impl SpeechAudio {
    pub(crate) fn encode(raw: &[u8], extension: String) -> Self {
        Self {
            b64_audio: STANDARD.encode(raw),
            extension,
        }
    }

    /// Raw audio bytes.
    pub fn decode(&self) -> Result<Vec<u8>, LlmError> {
        STANDARD
            .decode(&self.b64_audio)
            .map_err(|e| LlmError::decode("Failed to decode base64 audio", e))
    }
}
