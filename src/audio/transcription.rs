use serde::Deserialize;

use super::upload::FileInput;
use crate::core::{ApiErrorBody, LlmError, MultipartBody, decode::InBandError};
use crate::provider::constants::openai::{
    TRANSCRIPTION_ENDPOINT, TRANSCRIPTION_MODEL, TRANSLATION_ENDPOINT,
};

/// Speech-to-text in the spoken language.
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub file: FileInput,
    /// Text to guide the model's style or continue a previous segment
    pub prompt: Option<String>,
    /// ISO-639-1 language of the audio
    pub language: Option<String>,
    /// Sampling temperature between 0 and 1. Zero lets the provider choose.
    pub temperature: Option<f64>,
}

impl TranscriptionRequest {
    pub fn new(file: FileInput) -> Self {
        Self {
            file,
            prompt: None,
            language: None,
            temperature: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Speech-to-text into English.
#[derive(Debug)]
pub struct TranslationRequest {
    pub file: FileInput,
    pub prompt: Option<String>,
    pub temperature: Option<f64>,
}

impl TranslationRequest {
    pub fn new(file: FileInput) -> Self {
        Self {
            file,
            prompt: None,
            temperature: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Timestamp modes of a transcription. At most one may be enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub word_timestamps: bool,
    pub segment_timestamps: bool,
}

impl TranscriptionOptions {
    pub fn words() -> Self {
        Self {
            word_timestamps: true,
            segment_timestamps: false,
        }
    }

    pub fn segments() -> Self {
        Self {
            word_timestamps: false,
            segment_timestamps: true,
        }
    }

    pub(crate) fn granularity(&self) -> Result<Option<Granularity>, LlmError> {
        match (self.word_timestamps, self.segment_timestamps) {
            (true, true) => Err(LlmError::InvalidArgument(
                "Word and segment timestamps cannot both be requested".to_string(),
            )),
            (true, false) => Ok(Some(Granularity::Word)),
            (false, true) => Ok(Some(Granularity::Segment)),
            (false, false) => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Word,
    Segment,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Word => "word",
            Granularity::Segment => "segment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTask {
    Transcription,
    Translation,
}

impl AudioTask {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AudioTask::Transcription => TRANSCRIPTION_ENDPOINT,
            AudioTask::Translation => TRANSLATION_ENDPOINT,
        }
    }
}

/// Fields shared by both upload tasks, before the file is read.
#[derive(Debug)]
pub(crate) struct UploadForm {
    pub task: AudioTask,
    pub file: FileInput,
    pub prompt: Option<String>,
    pub language: Option<String>,
    pub temperature: Option<f64>,
    pub options: TranscriptionOptions,
}

impl From<TranscriptionRequest> for UploadForm {
    fn from(request: TranscriptionRequest) -> Self {
        Self {
            task: AudioTask::Transcription,
            file: request.file,
            prompt: request.prompt,
            language: request.language,
            temperature: request.temperature,
            options: TranscriptionOptions::default(),
        }
    }
}

impl From<TranslationRequest> for UploadForm {
    fn from(request: TranslationRequest) -> Self {
        Self {
            task: AudioTask::Translation,
            file: request.file,
            prompt: request.prompt,
            language: None,
            temperature: request.temperature,
            options: TranscriptionOptions::default(),
        }
    }
}

impl UploadForm {
    pub(crate) fn with_options(mut self, options: TranscriptionOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate and read the file into a multipart body.
    ///
    /// The timestamp flags and the temperature are checked before the input is opened.
    pub(crate) async fn encode(self) -> Result<MultipartBody, LlmError> {
        let granularity = match self.task {
            AudioTask::Transcription => self.options.granularity()?,
            AudioTask::Translation => None,
        };

        let temperature = self.temperature.filter(|t| *t != 0.0);
        if let Some(temperature) = temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(LlmError::OutOfRange(format!(
                    "temperature must be between 0 and 1, got {temperature}"
                )));
            }
        }

        let file = self.file.into_file_part().await?;

        let mut body = MultipartBody::new(file).text("model", TRANSCRIPTION_MODEL);

        if let Some(temperature) = temperature {
            body = body.text("temperature", format!("{temperature:.6}"));
        }
        if let Some(prompt) = self.prompt.filter(|p| !p.is_empty()) {
            body = body.text("prompt", prompt);
        }
        if self.task == AudioTask::Transcription {
            if let Some(language) = self.language.filter(|l| !l.is_empty()) {
                body = body.text("language", language);
            }
        }
        if let Some(granularity) = granularity {
            body = body
                .text("response_format", "verbose_json")
                .text("timestamp_granularities[]", granularity.as_str());
        }

        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WordTranscription {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentTranscription {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub seek: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<u32>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub avg_logprob: f64,
    #[serde(default)]
    pub compression_ratio: f64,
    #[serde(default)]
    pub no_speech_prob: f64,
}

impl InBandError for Transcription {
    fn in_band_error(&self) -> Option<&ApiErrorBody> {
        self.error.as_ref()
    }
}

impl InBandError for WordTranscription {
    fn in_band_error(&self) -> Option<&ApiErrorBody> {
        self.error.as_ref()
    }
}

impl InBandError for SegmentTranscription {
    fn in_band_error(&self) -> Option<&ApiErrorBody> {
        self.error.as_ref()
    }
}

/// Transcription in the shape selected by [`TranscriptionOptions`].
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionResult {
    Text(Transcription),
    Words(WordTranscription),
    Segments(SegmentTranscription),
}

impl TranscriptionResult {
    pub fn text(&self) -> &str {
        match self {
            TranscriptionResult::Text(t) => &t.text,
            TranscriptionResult::Words(t) => &t.text,
            TranscriptionResult::Segments(t) => &t.text,
        }
    }
}
