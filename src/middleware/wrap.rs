//! Wrapping a model with middleware.
//!
//! [`wrap_language_model`] composes a backend handle with an ordered
//! middleware chain and returns a handle with the identical invocation
//! contract, so a registry can bind the wrapped handle under a logical id
//! without callers ever seeing the difference.

use std::sync::Arc;

use futures::StreamExt;

use crate::error::LlmError;
use crate::middleware::language_model::{
    LanguageModelMiddleware, apply_post_generate_chain, apply_stream_stage_chain,
    apply_transform_chain, collect_stream_stages, finalize_stream_stage_chain,
};
use crate::streaming::ChatStream;
use crate::traits::LanguageModel;
use crate::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// Wrap a language model with a middleware chain.
pub fn wrap_language_model(
    model: Arc<dyn LanguageModel>,
    middlewares: Vec<Arc<dyn LanguageModelMiddleware>>,
) -> Arc<dyn LanguageModel> {
    Arc::new(WrappedLanguageModel {
        inner: model,
        middlewares,
    })
}

struct WrappedLanguageModel {
    inner: Arc<dyn LanguageModel>,
    middlewares: Vec<Arc<dyn LanguageModelMiddleware>>,
}

#[async_trait]
impl LanguageModel for WrappedLanguageModel {
    async fn generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let req = apply_transform_chain(&self.middlewares, request);
        let resp = self.inner.generate(req.clone()).await?;
        apply_post_generate_chain(&self.middlewares, &req, resp)
    }

    async fn stream(&self, request: ChatRequest) -> Result<ChatStream, LlmError> {
        let req = apply_transform_chain(&self.middlewares, request);
        let inner = self.inner.stream(req).await?;

        // Fresh stages per invocation: concurrent streams over the same
        // wrapped handle never share parse state.
        let stages = collect_stream_stages(&self.middlewares);
        if stages.is_empty() {
            return Ok(inner);
        }

        let s = async_stream::stream! {
            let mut inner = inner;
            let mut stages = stages;
            while let Some(item) = inner.next().await {
                match item {
                    Ok(ev) => match apply_stream_stage_chain(&mut stages, ev) {
                        Ok(events) => {
                            for e in events {
                                yield Ok(e);
                            }
                        }
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    },
                    // Inner failures and early termination pass through
                    // unsuppressed; the stages are simply dropped.
                    Err(e) => yield Err(e),
                }
            }
            match finalize_stream_stage_chain(&mut stages) {
                Ok(events) => {
                    for e in events {
                        yield Ok(e);
                    }
                }
                Err(e) => yield Err(e),
            }
        };
        Ok(Box::pin(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatStreamEvent, MessageContent};
    use futures_util::StreamExt;

    struct EchoModel;

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
            Ok(ChatResponse::new(MessageContent::Text(request.prompt)))
        }

        async fn stream(&self, request: ChatRequest) -> Result<ChatStream, LlmError> {
            let events = vec![
                Ok(ChatStreamEvent::ContentDelta {
                    delta: request.prompt,
                }),
                Ok(ChatStreamEvent::StreamEnd {
                    response: ChatResponse::empty(),
                }),
            ];
            Ok(Box::pin(futures_util::stream::iter(events)))
        }
    }

    struct Uppercase;
    impl LanguageModelMiddleware for Uppercase {
        fn transform_params(&self, mut req: ChatRequest) -> ChatRequest {
            req.prompt = req.prompt.to_uppercase();
            req
        }
    }

    #[tokio::test]
    async fn wrapped_generate_keeps_the_invocation_contract() {
        let model = wrap_language_model(Arc::new(EchoModel), vec![Arc::new(Uppercase)]);
        let resp = model.generate(ChatRequest::new("hello")).await.unwrap();
        assert_eq!(resp.content_text().as_deref(), Some("HELLO"));
    }

    #[tokio::test]
    async fn wrapped_stream_without_stages_is_passthrough() {
        let model = wrap_language_model(Arc::new(EchoModel), vec![Arc::new(Uppercase)]);
        let stream = model.stream(ChatRequest::new("hi")).await.unwrap();
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
    }
}
