pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

    pub const CHAT_ENDPOINT: &str = "/chat/completions";
    pub const IMAGES_ENDPOINT: &str = "/images/generations";
    pub const SPEECH_ENDPOINT: &str = "/audio/speech";
    pub const TRANSCRIPTION_ENDPOINT: &str = "/audio/transcriptions";
    pub const TRANSLATION_ENDPOINT: &str = "/audio/translations";

    /// The only model served by the transcription and translation endpoints
    pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

    pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";
    pub const PROJECT_HEADER: &str = "OpenAI-Project";
}
