//! Error types for the routing layer.
//!
//! Startup errors (`DuplicateModelId`, `CatalogIntegrity`) are meant to abort
//! initialization; call-boundary errors (`ModelNotFound`,
//! `MalformedReasoningOutput`) are returned to the caller. Nothing in this
//! crate retries internally.

use thiserror::Error;

/// Errors produced by the routing layer or passed through from a backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The requested logical model id is not registered in the namespace.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The same logical id was registered twice within one namespace.
    #[error("Duplicate model id: {0}")]
    DuplicateModelId(String),

    /// Generated output opened a reasoning marker but never closed it.
    #[error("Malformed reasoning output: {0}")]
    MalformedReasoningOutput(String),

    /// A catalog entry or the default selection does not resolve in the registry.
    #[error("Catalog integrity error: {0}")]
    CatalogIntegrity(String),

    /// Invalid configuration (empty tag name, double global initialization, ...).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A backend provider failed; the routing layer passes this through untouched.
    #[error("Provider error ({provider}): {message}")]
    ProviderError {
        /// Provider that produced the failure.
        provider: String,
        /// Provider-supplied error message.
        message: String,
    },

    /// A streaming invocation failed mid-stream.
    #[error("Stream error: {0}")]
    StreamError(String),
}

/// Coarse classification used by callers to pick a recovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Misconfiguration detected at startup; abort initialization.
    Startup,
    /// Caller error or recoverable miss (e.g. fall back to the default model).
    Client,
    /// Failure originating in the backend provider or its transport.
    Provider,
}

impl LlmError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateModelId(_) | Self::CatalogIntegrity(_) | Self::ConfigurationError(_) => {
                ErrorCategory::Startup
            }
            Self::ModelNotFound(_) | Self::MalformedReasoningOutput(_) => ErrorCategory::Client,
            Self::ProviderError { .. } | Self::StreamError(_) => ErrorCategory::Provider,
        }
    }

    /// Whether retrying the same call could succeed. Retry policy itself
    /// belongs to the caller or the backend collaborator, never to this crate.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderError { .. } | Self::StreamError(_))
    }

    /// Convenience constructor for provider passthrough errors.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_are_not_retryable() {
        let err = LlmError::DuplicateModelId("chat-model-small".to_string());
        assert_eq!(err.category(), ErrorCategory::Startup);
        assert!(!err.is_retryable());
    }

    #[test]
    fn provider_errors_are_retryable() {
        let err = LlmError::provider("openai", "rate limited");
        assert_eq!(err.category(), ErrorCategory::Provider);
        assert!(err.is_retryable());
    }

    #[test]
    fn not_found_is_a_client_error() {
        let err = LlmError::ModelNotFound("nope".to_string());
        assert_eq!(err.category(), ErrorCategory::Client);
        assert!(!err.is_retryable());
    }
}
