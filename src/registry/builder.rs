//! Declarative registry construction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LlmError;
use crate::registry::ProviderRegistry;
use crate::traits::{ImageModel, LanguageModel};

/// Builder for a [`ProviderRegistry`].
///
/// Bindings are declared as a fixed table of `(logical id, handle)` pairs per
/// namespace; `build()` validates the table and produces the immutable
/// registry. Rebinding a logical id to a different backend means building a
/// different table - there is no runtime mutation path.
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    language_models: Vec<(String, Arc<dyn LanguageModel>)>,
    image_models: Vec<(String, Arc<dyn ImageModel>)>,
}

impl ProviderRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a language model handle to a logical id in the text namespace.
    ///
    /// The handle may be a bare backend handle or one wrapped with
    /// [`wrap_language_model`](crate::middleware::wrap_language_model);
    /// the registry does not distinguish them.
    pub fn language_model(mut self, id: impl Into<String>, model: Arc<dyn LanguageModel>) -> Self {
        self.language_models.push((id.into(), model));
        self
    }

    /// Bind an image model handle to a logical id in the image namespace.
    pub fn image_model(mut self, id: impl Into<String>, model: Arc<dyn ImageModel>) -> Self {
        self.image_models.push((id.into(), model));
        self
    }

    /// Validate the binding table and build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::DuplicateModelId`] if a logical id appears twice
    /// within one namespace. The first registration is never silently
    /// overwritten. The two namespaces are independent key spaces, so the
    /// same id string may appear in both.
    pub fn build(self) -> Result<ProviderRegistry, LlmError> {
        let mut language_models = HashMap::with_capacity(self.language_models.len());
        for (id, model) in self.language_models {
            if language_models.insert(id.clone(), model).is_some() {
                return Err(LlmError::DuplicateModelId(id));
            }
        }

        let mut image_models = HashMap::with_capacity(self.image_models.len());
        for (id, model) in self.image_models {
            if image_models.insert(id.clone(), model).is_some() {
                return Err(LlmError::DuplicateModelId(id));
            }
        }

        tracing::debug!(
            language_models = language_models.len(),
            image_models = image_models.len(),
            "provider registry built"
        );

        Ok(ProviderRegistry {
            language_models,
            image_models,
        })
    }
}

impl std::fmt::Debug for ProviderRegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistryBuilder")
            .field(
                "language_models",
                &self
                    .language_models
                    .iter()
                    .map(|(id, _)| id.as_str())
                    .collect::<Vec<_>>(),
            )
            .field(
                "image_models",
                &self
                    .image_models
                    .iter()
                    .map(|(id, _)| id.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::ChatStream;
    use crate::types::{ChatRequest, ChatResponse, MessageContent};
    use async_trait::async_trait;
    use tracing_test::traced_test;

    struct NullModel;

    #[async_trait]
    impl crate::traits::LanguageModel for NullModel {
        async fn generate(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
            Ok(ChatResponse::new(MessageContent::Text(String::new())))
        }

        async fn stream(&self, _request: ChatRequest) -> Result<ChatStream, LlmError> {
            Ok(Box::pin(futures_util::stream::empty()))
        }
    }

    #[traced_test]
    #[test]
    fn build_logs_the_binding_counts() {
        let registry = ProviderRegistryBuilder::new()
            .language_model("chat-model-small", Arc::new(NullModel))
            .build()
            .unwrap();

        assert!(registry.has_language_model("chat-model-small"));
        assert!(logs_contain("provider registry built"));
    }

    #[test]
    fn duplicate_detection_refuses_to_build() {
        let err = ProviderRegistryBuilder::new()
            .language_model("title-model", Arc::new(NullModel))
            .language_model("title-model", Arc::new(NullModel))
            .build()
            .unwrap_err();
        assert!(matches!(err, LlmError::DuplicateModelId(id) if id == "title-model"));
    }
}
