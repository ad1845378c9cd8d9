//! Preset middleware implementations.

pub mod extract_reasoning;

pub use extract_reasoning::{ExtractReasoningMiddleware, ReasoningTagPresets};
