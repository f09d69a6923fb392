pub mod decode;
pub mod error;
pub mod http;
pub mod multipart;
pub mod traits;
pub mod types;

pub use decode::ApiErrorBody;
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig, HttpRequest, HttpResponse, RequestBody};
pub use multipart::{FilePart, MultipartBody};
pub use traits::Transport;
pub use types::{ChatRole, ContentBlock, ImageUrl, Message, MessageContent};
