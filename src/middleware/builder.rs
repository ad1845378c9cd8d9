//! Middleware chain construction.

use super::LanguageModelMiddleware;
use std::sync::Arc;

/// A middleware paired with a stable name for chain manipulation.
#[derive(Clone)]
pub struct NamedMiddleware {
    /// Unique name within a chain.
    pub name: String,
    /// The middleware implementation.
    pub middleware: Arc<dyn LanguageModelMiddleware>,
}

impl NamedMiddleware {
    /// Create a named middleware.
    pub fn new(name: impl Into<String>, middleware: Arc<dyn LanguageModelMiddleware>) -> Self {
        Self {
            name: name.into(),
            middleware,
        }
    }
}

/// Builder for ordered middleware chains.
#[derive(Default)]
pub struct MiddlewareBuilder {
    middlewares: Vec<NamedMiddleware>,
}

impl MiddlewareBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named middleware to the end of the chain.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        middleware: Arc<dyn LanguageModelMiddleware>,
    ) -> &mut Self {
        self.middlewares.push(NamedMiddleware::new(name, middleware));
        self
    }

    /// Check if a middleware with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.middlewares.iter().any(|m| m.name == name)
    }

    /// Remove a middleware by name.
    pub fn remove(&mut self, name: &str) -> &mut Self {
        if !self.has(name) {
            tracing::warn!(
                "MiddlewareBuilder: middleware named '{}' not found, nothing removed",
                name
            );
        }
        self.middlewares.retain(|m| m.name != name);
        self
    }

    /// Number of middlewares in the chain.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Build the final middleware chain in insertion order.
    pub fn build(self) -> Vec<Arc<dyn LanguageModelMiddleware>> {
        self.middlewares.into_iter().map(|m| m.middleware).collect()
    }
}

impl std::fmt::Debug for MiddlewareBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareBuilder")
            .field("count", &self.middlewares.len())
            .field(
                "names",
                &self
                    .middlewares
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
