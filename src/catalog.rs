//! Static catalog of user-selectable chat models.
//!
//! The catalog describes the logical chat models a presentation layer may
//! offer for end-user selection. Internal roles (title generation, artifact
//! generation) are bound in the registry but deliberately absent here.

use serde::Serialize;

use crate::error::LlmError;
use crate::registry::ProviderRegistry;

/// The logical id used when the user has not made an explicit choice.
pub const DEFAULT_CHAT_MODEL: &str = "chat-model-small";

/// Display metadata for one user-selectable chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatModelInfo {
    /// Logical model id, resolvable in the registry's text namespace.
    pub id: &'static str,
    /// Human-readable display name.
    pub name: &'static str,
    /// Short description shown alongside the name.
    pub description: &'static str,
}

static CHAT_MODELS: &[ChatModelInfo] = &[
    ChatModelInfo {
        id: "chat-model-small",
        name: "Small model",
        description: "Small model for fast, lightweight tasks",
    },
    ChatModelInfo {
        id: "chat-model-large",
        name: "Large model",
        description: "Large model for complex, multi-step tasks",
    },
    ChatModelInfo {
        id: "chat-model-reasoning",
        name: "Reasoning model",
        description: "Uses advanced reasoning",
    },
];

/// The user-selectable chat models, in declaration order.
pub fn chat_models() -> &'static [ChatModelInfo] {
    CHAT_MODELS
}

/// Verify the cross-component invariant between catalog and registry.
///
/// Every catalog id and [`DEFAULT_CHAT_MODEL`] must resolve in the text
/// namespace. Call this once at startup, right after building the registry:
/// a failure is a configuration bug and must abort initialization rather
/// than surface on first use.
///
/// # Errors
///
/// Returns [`LlmError::CatalogIntegrity`] naming the first id that does not
/// resolve.
pub fn verify_catalog(registry: &ProviderRegistry) -> Result<(), LlmError> {
    for info in chat_models() {
        if !registry.has_language_model(info.id) {
            return Err(LlmError::CatalogIntegrity(format!(
                "catalog entry '{}' is not bound in the registry",
                info.id
            )));
        }
    }
    if !registry.has_language_model(DEFAULT_CHAT_MODEL) {
        return Err(LlmError::CatalogIntegrity(format!(
            "default chat model '{DEFAULT_CHAT_MODEL}' is not bound in the registry"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_declaration_order() {
        let ids: Vec<&str> = chat_models().iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec!["chat-model-small", "chat-model-large", "chat-model-reasoning"]
        );
    }

    #[test]
    fn default_model_appears_in_catalog() {
        assert!(chat_models().iter().any(|m| m.id == DEFAULT_CHAT_MODEL));
    }

    #[test]
    fn entries_serialize_for_presentation_layers() {
        let json = serde_json::to_value(&chat_models()[0]).unwrap();
        assert_eq!(json["id"], "chat-model-small");
        assert_eq!(json["name"], "Small model");
    }
}
