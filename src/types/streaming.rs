//! Streaming event types for incremental responses.

use serde::{Deserialize, Serialize};

use super::chat::{ChatResponse, Usage};

/// Chat streaming event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatStreamEvent {
    /// Stream start.
    StreamStart {
        /// Concrete model serving the stream, when known.
        model: Option<String>,
    },
    /// Final-answer content delta.
    ContentDelta {
        /// The incremental text content.
        delta: String,
    },
    /// Reasoning/thinking content delta, produced by middleware that splits
    /// tag-delimited reasoning out of the answer, or natively by a provider.
    ThinkingDelta {
        /// The incremental reasoning content.
        delta: String,
    },
    /// Usage statistics update.
    UsageUpdate {
        /// Token usage so far.
        usage: Usage,
    },
    /// Stream end with the assembled final response.
    StreamEnd {
        /// Final response.
        response: ChatResponse,
    },
    /// Provider-reported error during streaming.
    Error {
        /// Error message.
        error: String,
    },
}
