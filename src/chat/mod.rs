pub mod content;
pub mod format;
pub mod request;
pub mod response;

pub use content::{ImageSource, SUPPORTED_IMAGE_MEDIA_TYPES, compose_vision_content};
pub use format::{FormatType, JsonSchema, ResponseFormat, wrap_schema};
pub use request::{ChatCall, ChatCompletionRequest};
pub use response::{
    AssistantMessage, AudioOutput, ChatCompletion, Choice, CompletionTokensDetails, Usage,
};
