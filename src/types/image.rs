//! Image generation request and response types.

use serde::{Deserialize, Serialize};

/// An image generation request routed to a backend model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    /// The prompt to generate images from.
    pub prompt: String,
    /// Requested size, e.g. "1024x1024" (provider-specific).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Number of images to generate.
    pub count: u32,
}

impl ImageGenerationRequest {
    /// Create a request for a single image.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: None,
            count: 1,
        }
    }
}

/// A single generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// URL of the generated image, if the provider hosts it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64-encoded image data, if returned inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_data: Option<String>,
}

/// An image generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    /// The generated images.
    pub images: Vec<GeneratedImage>,
    /// Concrete model that served the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
