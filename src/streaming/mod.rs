//! Core streaming types.

use futures::Stream;
use std::pin::Pin;

use crate::error::LlmError;

pub use crate::types::ChatStreamEvent;

/// Chat stream - a pinned, boxed stream of [`ChatStreamEvent`] items.
///
/// All backend handles and middleware wrappers produce this type.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, LlmError>> + Send>>;

/// Chat stream with a first-class cancellation handle.
///
/// Cancelling ends the stream at the next poll; the underlying handle's own
/// termination signal is propagated, never suppressed, by wrappers.
pub struct ChatStreamHandle {
    /// The underlying chat stream.
    pub stream: ChatStream,
    /// Handle to cancel the stream.
    pub cancel: crate::utils::cancel::CancelHandle,
}
