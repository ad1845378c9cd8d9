//! Capability traits implemented by backend model handles.
//!
//! A backend handle is an opaque, invocable unit supplied by a provider crate
//! or the application. The registry stores handles as trait objects and hands
//! them back on resolution; it never invokes them itself.

use crate::error::LlmError;
use crate::streaming::{ChatStream, ChatStreamHandle};
use crate::types::{ChatRequest, ChatResponse, ImageGenerationRequest, ImageGenerationResponse};
use async_trait::async_trait;

/// A text-generation model handle.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a complete response for the request.
    async fn generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Stream the response incrementally.
    async fn stream(&self, request: ChatRequest) -> Result<ChatStream, LlmError>;

    /// Stream the response with a first-class cancellation handle.
    async fn stream_with_cancel(
        &self,
        request: ChatRequest,
    ) -> Result<ChatStreamHandle, LlmError> {
        let stream = self.stream(request).await?;
        let (cancellable, cancel) = crate::utils::cancel::make_cancellable_stream(stream);
        Ok(ChatStreamHandle {
            stream: cancellable,
            cancel,
        })
    }
}

impl std::fmt::Debug for dyn LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<dyn LanguageModel>")
    }
}

/// An image-generation model handle.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate images for the request.
    async fn generate_images(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse, LlmError>;
}

impl std::fmt::Debug for dyn ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<dyn ImageModel>")
    }
}
