//! Provider-agnostic request, response, and event types.

pub mod chat;
pub mod image;
pub mod streaming;

pub use chat::{ChatRequest, ChatResponse, ContentPart, FinishReason, MessageContent, Usage};
pub use image::{GeneratedImage, ImageGenerationRequest, ImageGenerationResponse};
pub use streaming::ChatStreamEvent;
