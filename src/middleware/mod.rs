//! Model-level middleware.
//!
//! Middleware composes around a backend handle and transforms its output
//! without changing the invocation contract. Chains are assembled once, at
//! registry construction time; callers never interact with them directly.

pub mod builder;
pub mod language_model;
pub mod presets;
pub mod tag_extractor;
pub mod wrap;

pub use builder::{MiddlewareBuilder, NamedMiddleware};
pub use language_model::{
    LanguageModelMiddleware, StreamStage, apply_post_generate_chain, apply_transform_chain,
};
pub use tag_extractor::{TagConfig, TagExtractor, TagSpan};
pub use wrap::wrap_language_model;
