use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use tracing::debug;

use super::constants::openai::{
    API_BASE, API_KEY_ENV_VAR, BASE_URL_ENV_VAR, CHAT_ENDPOINT, DEFAULT_MODEL, IMAGES_ENDPOINT,
    ORGANIZATION_HEADER, PROJECT_HEADER, SPEECH_ENDPOINT,
};
use crate::audio::transcription::UploadForm;
use crate::audio::{
    Granularity, SegmentTranscription, SpeechAudio, SpeechRequest, Transcription, TranscriptionOptions,
    TranscriptionRequest, TranscriptionResult, TranslationRequest, WordTranscription,
};
use crate::chat::{AssistantMessage, ChatCall, ChatCompletion};
use crate::core::decode::{decode_checked, decode_json};
use crate::core::{HttpClient, HttpClientConfig, HttpRequest, LlmError, RequestBody, Transport};
use crate::images::{ImageGeneration, ImageGenerationRequest};

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct OpenAiConfig {
    api_key: String,
    pub base_url: String,
    /// Model used for chat calls built from plain messages
    pub default_model: String,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub http: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            organization: None,
            project: None,
            http: HttpClientConfig::default(),
        }
    }

    /// Read the API key from `OPENAI_API_KEY`, and the base URL from `OPENAI_BASE_URL`
    /// when it is set.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| LlmError::Auth(format!("{API_KEY_ENV_VAR} not set.")))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = Some(user_agent.into());
        self
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(organization) = &self.organization {
            headers.push((ORGANIZATION_HEADER.to_string(), organization.clone()));
        }
        if let Some(project) = &self.project {
            headers.push((PROJECT_HEADER.to_string(), project.clone()));
        }
        headers
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("http", &self.http)
            .finish()
    }
}

/// Client for the chat, image, speech and transcription endpoints.
///
/// Every operation validates its input first, then checks the API key, and only then
/// talks to the network. A failed validation never reaches the transport.
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    transport: Arc<dyn Transport>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(&config.http)?;
        Ok(Self::with_transport(config, Arc::new(http)))
    }

    /// Use `transport` instead of the built-in reqwest client.
    pub fn with_transport(config: OpenAiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    #[tracing::instrument(
        name = "chat_completion",
        skip(self, call),
        fields(endpoint = CHAT_ENDPOINT, model = tracing::field::Empty),
        err
    )]
    pub async fn chat(&self, call: ChatCall) -> Result<ChatCompletion, LlmError> {
        let request = call.into_request(&self.config.default_model)?;
        tracing::Span::current().record("model", request.model.as_str());

        let body = RequestBody::json(&request)?;
        let bytes = self.send(CHAT_ENDPOINT, body).await?;

        decode_json(&bytes, "chat completion")
    }

    /// Like [`OpenAiClient::chat`], keeping only the first choice's message.
    pub async fn chat_first_message(&self, call: ChatCall) -> Result<AssistantMessage, LlmError> {
        self.chat(call).await?.into_first_message()
    }

    #[tracing::instrument(
        name = "image_generation",
        skip(self, request),
        fields(endpoint = IMAGES_ENDPOINT, model = %request.model),
        err
    )]
    pub async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGeneration, LlmError> {
        request.validate()?;

        let body = RequestBody::json(&request)?;
        let bytes = self.send(IMAGES_ENDPOINT, body).await?;

        decode_json(&bytes, "image generation")
    }

    /// Synthesize speech. The audio comes back base64 encoded; nothing is written to disk.
    #[tracing::instrument(
        name = "text_to_speech",
        skip(self, request),
        fields(endpoint = SPEECH_ENDPOINT, model = %request.model),
        err
    )]
    pub async fn text_to_speech(&self, request: SpeechRequest) -> Result<SpeechAudio, LlmError> {
        request.validate()?;

        let extension = request.extension();
        let body = RequestBody::json(&request)?;
        let bytes = self.send(SPEECH_ENDPOINT, body).await?;

        Ok(SpeechAudio::encode(&bytes, extension))
    }

    pub async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription, LlmError> {
        let bytes = self.upload(UploadForm::from(request)).await?;
        decode_checked(&bytes, "transcription")
    }

    /// Transcribe with the timestamp mode selected by `options`.
    pub async fn transcribe_with(
        &self,
        request: TranscriptionRequest,
        options: TranscriptionOptions,
    ) -> Result<TranscriptionResult, LlmError> {
        let form = UploadForm::from(request).with_options(options);
        let granularity = options.granularity()?;
        let bytes = self.upload(form).await?;

        Ok(match granularity {
            None => TranscriptionResult::Text(decode_checked(&bytes, "transcription")?),
            Some(Granularity::Word) => {
                TranscriptionResult::Words(decode_checked(&bytes, "word transcription")?)
            }
            Some(Granularity::Segment) => {
                TranscriptionResult::Segments(decode_checked(&bytes, "segment transcription")?)
            }
        })
    }

    pub async fn transcribe_word_timestamps(
        &self,
        request: TranscriptionRequest,
    ) -> Result<WordTranscription, LlmError> {
        let form = UploadForm::from(request).with_options(TranscriptionOptions::words());
        let bytes = self.upload(form).await?;
        decode_checked(&bytes, "word transcription")
    }

    pub async fn transcribe_segment_timestamps(
        &self,
        request: TranscriptionRequest,
    ) -> Result<SegmentTranscription, LlmError> {
        let form = UploadForm::from(request).with_options(TranscriptionOptions::segments());
        let bytes = self.upload(form).await?;
        decode_checked(&bytes, "segment transcription")
    }

    /// Translate spoken audio into English text.
    pub async fn translate(&self, request: TranslationRequest) -> Result<Transcription, LlmError> {
        let bytes = self.upload(UploadForm::from(request)).await?;
        decode_checked(&bytes, "translation")
    }

    #[tracing::instrument(
        name = "audio_upload",
        skip(self, form),
        fields(endpoint = form.task.endpoint()),
        err
    )]
    async fn upload(&self, form: UploadForm) -> Result<Bytes, LlmError> {
        let endpoint = form.task.endpoint();
        let body = form.encode().await?;
        debug!(
            file_name = %body.file().file_name,
            bytes = body.file().content.len(),
            "Encoded audio upload"
        );

        self.send(endpoint, RequestBody::Multipart(body)).await
    }

    async fn send(&self, endpoint: &str, body: RequestBody) -> Result<Bytes, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::Auth("API key is empty".to_string()));
        }

        let request = HttpRequest {
            method: Method::POST,
            url: format!("{}{}", self.config.base_url, endpoint),
            bearer_token: self.config.api_key.clone(),
            headers: self.config.extra_headers(),
            body,
        };

        let response = self.transport.exchange(request).await.inspect_err(|e| {
            if let Some(status) = e.status_code() {
                debug!(status, endpoint, "Provider rejected request");
            }
        })?;
        Ok(response.body)
    }
}
