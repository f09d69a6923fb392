use serde::{Deserialize, Serialize};

use crate::core::LlmError;

pub const IMAGE_MODELS: [&str; 2] = ["dall-e-2", "dall-e-3"];
pub const IMAGE_QUALITIES: [&str; 2] = ["standard", "hd"];
pub const IMAGE_STYLES: [&str; 2] = ["vivid", "natural"];
pub const IMAGE_RESPONSE_FORMATS: [&str; 2] = ["url", "b64_json"];

const MAX_IMAGES: u32 = 10;

/// Wire body of `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,

    pub model: String,

    /// Number of images, 1 to 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    /// `dall-e-3` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Left to the provider, e.g. `1024x1024`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// `dall-e-3` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            n: None,
            quality: None,
            size: None,
            style: None,
            response_format: None,
            user: None,
        }
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Checks run in a fixed order and stop at the first failure.
    pub fn validate(&self) -> Result<(), LlmError> {
        if !IMAGE_MODELS.contains(&self.model.as_str()) {
            return Err(LlmError::InvalidArgument(format!(
                "Invalid image model '{}', expected one of: {}",
                self.model,
                IMAGE_MODELS.join(", ")
            )));
        }

        if let Some(n) = self.n {
            if !(1..=MAX_IMAGES).contains(&n) {
                return Err(LlmError::OutOfRange(format!(
                    "n must be between 1 and {MAX_IMAGES}, got {n}"
                )));
            }
        }

        if self.model == "dall-e-2" && (self.quality.is_some() || self.style.is_some()) {
            return Err(LlmError::InvalidArgument(
                "quality and style are only supported by dall-e-3".to_string(),
            ));
        }

        check_member("quality", self.quality.as_deref(), &IMAGE_QUALITIES)?;
        check_member("style", self.style.as_deref(), &IMAGE_STYLES)?;
        check_member(
            "response_format",
            self.response_format.as_deref(),
            &IMAGE_RESPONSE_FORMATS,
        )?;

        if self.prompt.is_empty() {
            return Err(LlmError::MissingArgument(
                "Image prompt must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_member(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), LlmError> {
    match value {
        Some(value) if !allowed.contains(&value) => Err(LlmError::InvalidArgument(format!(
            "Invalid {field} '{value}', expected one of: {}",
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dalle3() -> ImageGenerationRequest {
        ImageGenerationRequest::new("dall-e-3", "A lighthouse at dusk")
    }

    #[test]
    fn test_minimal_request_is_valid_and_compact() {
        let request = dalle3();
        request.validate().unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "prompt": "A lighthouse at dusk", "model": "dall-e-3" })
        );
    }

    #[test]
    fn test_unknown_model_is_invalid() {
        let request = ImageGenerationRequest::new("dall-e-4", "x");
        assert!(matches!(
            request.validate(),
            Err(LlmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_n_bounds() {
        for n in [1, 5, 10] {
            dalle3().with_n(n).validate().unwrap();
        }
        for n in [0, 11, 100] {
            assert!(
                matches!(dalle3().with_n(n).validate(), Err(LlmError::OutOfRange(_))),
                "n = {n} should be out of range"
            );
        }
    }

    #[test]
    fn test_quality_and_style_rejected_for_dalle2() {
        let request = ImageGenerationRequest::new("dall-e-2", "x").with_quality("standard");
        assert!(matches!(
            request.validate(),
            Err(LlmError::InvalidArgument(_))
        ));

        let request = ImageGenerationRequest::new("dall-e-2", "x").with_style("vivid");
        assert!(matches!(
            request.validate(),
            Err(LlmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_enumerated_fields() {
        dalle3()
            .with_quality("hd")
            .with_style("natural")
            .with_response_format("b64_json")
            .with_size("1792x1024")
            .validate()
            .unwrap();

        assert!(matches!(
            dalle3().with_quality("ultra").validate(),
            Err(LlmError::InvalidArgument(_))
        ));
        assert!(matches!(
            dalle3().with_style("pastel").validate(),
            Err(LlmError::InvalidArgument(_))
        ));
        assert!(matches!(
            dalle3().with_response_format("png").validate(),
            Err(LlmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_checks_are_ordered() {
        // Bad model wins over bad n.
        let request = ImageGenerationRequest::new("midjourney", "x").with_n(0);
        assert!(matches!(
            request.validate(),
            Err(LlmError::InvalidArgument(_))
        ));

        // Bad n wins over dall-e-2 style.
        let request = ImageGenerationRequest::new("dall-e-2", "x")
            .with_n(20)
            .with_style("vivid");
        assert!(matches!(request.validate(), Err(LlmError::OutOfRange(_))));

        // Everything else wins over an empty prompt.
        let request = ImageGenerationRequest::new("dall-e-3", "").with_response_format("gif");
        assert!(matches!(
            request.validate(),
            Err(LlmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_prompt_is_missing_argument() {
        let request = ImageGenerationRequest::new("dall-e-2", "");
        assert!(matches!(
            request.validate(),
            Err(LlmError::MissingArgument(_))
        ));
    }
}
