pub mod request;
pub mod response;

pub use request::{
    IMAGE_MODELS, IMAGE_QUALITIES, IMAGE_RESPONSE_FORMATS, IMAGE_STYLES, ImageGenerationRequest,
};
pub use response::{ImageData, ImageGeneration};
