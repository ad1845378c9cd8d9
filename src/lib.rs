//! # Modelgate - Model Routing for LLM Applications
//!
//! Modelgate decouples an application's *logical* notion of "which model to
//! use for this task" from the *concrete* backend that serves the request.
//! Backend handles implement the capability traits; the registry binds them
//! to logical ids, optionally wrapped with output-transforming middleware;
//! the catalog describes the models a user may choose among.
//!
#![deny(unsafe_code)]
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelgate::prelude::*;
//! use std::sync::Arc;
//!
//! # fn backends() -> (Arc<dyn LanguageModel>, Arc<dyn LanguageModel>) { unimplemented!() }
//! fn main() -> Result<(), LlmError> {
//!     let (fast_backend, reasoner_backend) = backends();
//!
//!     let registry = ProviderRegistry::builder()
//!         .language_model("chat-model-small", fast_backend)
//!         .language_model(
//!             "chat-model-reasoning",
//!             wrap_language_model(
//!                 reasoner_backend,
//!                 vec![Arc::new(ExtractReasoningMiddleware::new("think")?)],
//!             ),
//!         )
//!         .build()?;
//!
//!     // Fail fast if the catalog or default selection does not resolve.
//!     verify_catalog(&registry)?;
//!
//!     let model = registry.language_model(DEFAULT_CHAT_MODEL)?;
//!     # let _ = model;
//!     Ok(())
//! }
//! ```
//!
//! Modelgate owns no transport: inference, streaming protocols, credentials,
//! retries, and cancellation of in-flight work all live in the backend
//! handles supplied by provider crates or the application.

pub mod catalog;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod utils;

pub use catalog::{ChatModelInfo, DEFAULT_CHAT_MODEL, chat_models, verify_catalog};
pub use error::{ErrorCategory, LlmError};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::catalog::{ChatModelInfo, DEFAULT_CHAT_MODEL, chat_models, verify_catalog};
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::middleware::presets::{ExtractReasoningMiddleware, ReasoningTagPresets};
    pub use crate::middleware::{
        LanguageModelMiddleware, MiddlewareBuilder, TagConfig, wrap_language_model,
    };
    pub use crate::registry::{ProviderRegistry, ProviderRegistryBuilder};
    pub use crate::streaming::{ChatStream, ChatStreamEvent, ChatStreamHandle};
    pub use crate::traits::{ImageModel, LanguageModel};
    pub use crate::types::{
        ChatRequest, ChatResponse, ContentPart, FinishReason, GeneratedImage,
        ImageGenerationRequest, ImageGenerationResponse, MessageContent, Usage,
    };
    pub use crate::utils::cancel::CancelHandle;
}
