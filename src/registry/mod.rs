//! Provider registry.
//!
//! The registry is the central, read-only lookup from logical model ids to
//! invocable handles, partitioned into a text namespace and an image
//! namespace. It is built exactly once from a declarative binding table and
//! never mutated afterwards, so concurrent resolution needs no locking. The
//! registry only hands back references; invocation, retries, and transport
//! all belong to the backend handles themselves.

pub mod builder;

pub use builder::ProviderRegistryBuilder;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::LlmError;
use crate::traits::{ImageModel, LanguageModel};

/// Immutable mapping from logical model ids to bound handles.
pub struct ProviderRegistry {
    pub(crate) language_models: HashMap<String, Arc<dyn LanguageModel>>,
    pub(crate) image_models: HashMap<String, Arc<dyn ImageModel>>,
}

impl ProviderRegistry {
    /// Start building a registry.
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::new()
    }

    /// Resolve a logical id in the text namespace.
    ///
    /// Pure lookup: no side effects, no backend invocation.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ModelNotFound`] if the id is not bound.
    pub fn language_model(&self, id: &str) -> Result<Arc<dyn LanguageModel>, LlmError> {
        self.language_models.get(id).cloned().ok_or_else(|| {
            tracing::debug!(
                id,
                available = ?self.language_model_ids(),
                "language model id not bound"
            );
            LlmError::ModelNotFound(id.to_string())
        })
    }

    /// Resolve a logical id in the image namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ModelNotFound`] if the id is not bound.
    pub fn image_model(&self, id: &str) -> Result<Arc<dyn ImageModel>, LlmError> {
        self.image_models.get(id).cloned().ok_or_else(|| {
            tracing::debug!(
                id,
                available = ?self.image_model_ids(),
                "image model id not bound"
            );
            LlmError::ModelNotFound(id.to_string())
        })
    }

    /// Whether a logical id is bound in the text namespace.
    pub fn has_language_model(&self, id: &str) -> bool {
        self.language_models.contains_key(id)
    }

    /// Whether a logical id is bound in the image namespace.
    pub fn has_image_model(&self, id: &str) -> bool {
        self.image_models.contains_key(id)
    }

    /// Bound text-namespace ids, sorted.
    pub fn language_model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.language_models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Bound image-namespace ids, sorted.
    pub fn image_model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.image_models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("language_models", &self.language_model_ids())
            .field("image_models", &self.image_model_ids())
            .finish()
    }
}

// Process-wide registry instance. Set once at startup, never torn down.
static GLOBAL_REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Returns [`LlmError::ConfigurationError`] if a registry was already
/// installed; the existing registry is left untouched.
pub fn init_global(registry: ProviderRegistry) -> Result<(), LlmError> {
    GLOBAL_REGISTRY.set(registry).map_err(|_| {
        LlmError::ConfigurationError("global provider registry already initialized".to_string())
    })
}

/// The process-wide registry, if one was installed.
pub fn global() -> Option<&'static ProviderRegistry> {
    GLOBAL_REGISTRY.get()
}
