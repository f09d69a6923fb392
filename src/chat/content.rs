//! Composition of mixed image + text message content.

use crate::core::{ContentBlock, ImageUrl, LlmError};

/// Media types accepted for base64 image payloads.
pub const SUPPORTED_IMAGE_MEDIA_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
];

/// Where the image of a vision message comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A URL the provider fetches itself
    Url(String),
    /// Base64 image data with its declared media type, e.g. `image/png`
    Base64 { media_type: String, data: String },
}

/// Build the content of a single-image vision message: the image block first, then a
/// text block when `caption` is non-empty.
pub fn compose_vision_content(
    image: ImageSource,
    caption: &str,
) -> Result<Vec<ContentBlock>, LlmError> {
    let url = match image {
        ImageSource::Url(url) => {
            if url.is_empty() {
                return Err(LlmError::InvalidArgument(
                    "Image URL must not be empty".to_string(),
                ));
            }
            url
        }
        ImageSource::Base64 { media_type, data } => {
            if data.is_empty() {
                return Err(LlmError::InvalidArgument(
                    "Base64 image data must not be empty".to_string(),
                ));
            }
            if media_type.is_empty() {
                return Err(LlmError::InvalidArgument(
                    "Media type must be provided for base64 images".to_string(),
                ));
            }
            if !SUPPORTED_IMAGE_MEDIA_TYPES.contains(&media_type.as_str()) {
                return Err(LlmError::InvalidArgument(format!(
                    "Unsupported media type '{media_type}', expected one of: {}",
                    SUPPORTED_IMAGE_MEDIA_TYPES.join(", ")
                )));
            }
            format!("data:{media_type};base64,{data}")
        }
    };

    let mut blocks = vec![ContentBlock::ImageUrl {
        image_url: ImageUrl { url },
    }];

    if !caption.is_empty() {
        blocks.push(ContentBlock::Text {
            text: caption.to_string(),
        });
    }

    Ok(blocks)
}
