//! # oaiwire
//!
//! Typed requests and responses for the OpenAI chat, image, speech and transcription
//! endpoints. Inputs are validated before anything touches the network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oaiwire::{ChatCall, Message, OpenAiClient, OpenAiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(OpenAiConfig::from_env()?)?;
//!
//!     let reply = client
//!         .chat_first_message(ChatCall::content(vec![
//!             Message::system("Answer in one sentence."),
//!             Message::user("Why is the sky blue?"),
//!         ]))
//!         .await?;
//!
//!     println!("{}", reply.content.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! The crate logs through `tracing` and installs no subscriber.

pub mod audio;
pub mod chat;
pub mod core;
pub mod images;
pub mod provider;

pub use audio::{
    FileInput, SegmentTranscription, SpeechAudio, SpeechRequest, Transcription,
    TranscriptionOptions, TranscriptionRequest, TranscriptionResult, TranslationRequest,
    WordTranscription,
};
pub use chat::{
    AssistantMessage, ChatCall, ChatCompletion, ChatCompletionRequest, ImageSource,
    ResponseFormat, compose_vision_content, wrap_schema,
};
pub use crate::core::{ChatRole, ContentBlock, LlmError, Message, MessageContent, Transport};
pub use images::{ImageGeneration, ImageGenerationRequest};
pub use provider::{OpenAiClient, OpenAiConfig};
