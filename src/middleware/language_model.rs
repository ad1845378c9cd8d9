//! Model-level middleware.
//!
//! Middleware transforms a model's requests and outputs without changing its
//! invocation contract. Non-stream responses go through `post_generate`;
//! streaming responses go through a per-invocation [`StreamStage`] so that no
//! parse state is ever shared between concurrent invocations of the same
//! wrapped model.

use std::sync::Arc;

use crate::error::LlmError;
use crate::types::{ChatRequest, ChatResponse, ChatStreamEvent};

/// Model-level middleware.
///
/// All hooks default to pass-through, so implementations only override what
/// they need.
pub trait LanguageModelMiddleware: Send + Sync {
    /// Transform the request before it reaches the wrapped model.
    fn transform_params(&self, req: ChatRequest) -> ChatRequest {
        req
    }

    /// Post-process a non-stream response.
    fn post_generate(
        &self,
        _req: &ChatRequest,
        resp: ChatResponse,
    ) -> Result<ChatResponse, LlmError> {
        Ok(resp)
    }

    /// Create a stage for one streaming invocation.
    ///
    /// Called once per `stream` call; the returned stage owns all per-response
    /// state. Return `None` when the middleware does not touch streams.
    fn stream_stage(&self) -> Option<Box<dyn StreamStage>> {
        None
    }
}

/// Per-invocation streaming stage.
///
/// Each streaming call gets a fresh stage, created by
/// [`LanguageModelMiddleware::stream_stage`]. A stage may hold parse state
/// across events; that state dies with the stream.
pub trait StreamStage: Send {
    /// Intercept a single event. May return zero or more events.
    fn on_event(&mut self, ev: ChatStreamEvent) -> Result<Vec<ChatStreamEvent>, LlmError>;

    /// Called when the underlying stream ends. May emit trailing events or
    /// fail the invocation (e.g. on a malformed output contract).
    fn finalize(&mut self) -> Result<Vec<ChatStreamEvent>, LlmError> {
        Ok(Vec::new())
    }
}

/// Apply `transform_params` across middlewares in order.
pub fn apply_transform_chain(
    middlewares: &[Arc<dyn LanguageModelMiddleware>],
    mut req: ChatRequest,
) -> ChatRequest {
    for mw in middlewares {
        req = mw.transform_params(req);
    }
    req
}

/// Apply post-generate processors in registration order.
pub fn apply_post_generate_chain(
    middlewares: &[Arc<dyn LanguageModelMiddleware>],
    req: &ChatRequest,
    mut resp: ChatResponse,
) -> Result<ChatResponse, LlmError> {
    for mw in middlewares {
        resp = mw.post_generate(req, resp)?;
    }
    Ok(resp)
}

/// Collect one fresh stage per middleware that participates in streaming.
pub fn collect_stream_stages(
    middlewares: &[Arc<dyn LanguageModelMiddleware>],
) -> Vec<Box<dyn StreamStage>> {
    middlewares.iter().filter_map(|mw| mw.stream_stage()).collect()
}

/// Run one event through a stage chain in registration order.
pub fn apply_stream_stage_chain(
    stages: &mut [Box<dyn StreamStage>],
    ev: ChatStreamEvent,
) -> Result<Vec<ChatStreamEvent>, LlmError> {
    let mut events = vec![ev];
    for stage in stages.iter_mut() {
        let mut next_batch = Vec::new();
        for e in events {
            next_batch.extend(stage.on_event(e)?);
        }
        events = next_batch;
    }
    Ok(events)
}

/// Finalize a stage chain in registration order, threading trailing events of
/// earlier stages through the later ones.
pub fn finalize_stream_stage_chain(
    stages: &mut [Box<dyn StreamStage>],
) -> Result<Vec<ChatStreamEvent>, LlmError> {
    let mut out = Vec::new();
    for i in 0..stages.len() {
        let trailing = stages[i].finalize()?;
        let mut events = trailing;
        for stage in stages[i + 1..].iter_mut() {
            let mut next_batch = Vec::new();
            for e in events {
                next_batch.extend(stage.on_event(e)?);
            }
            events = next_batch;
        }
        out.extend(events);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageContent;

    struct AppendPromptSuffix(&'static str);
    impl LanguageModelMiddleware for AppendPromptSuffix {
        fn transform_params(&self, mut req: ChatRequest) -> ChatRequest {
            req.prompt.push_str(self.0);
            req
        }
    }

    struct PostAppendSuffix(&'static str);
    impl LanguageModelMiddleware for PostAppendSuffix {
        fn post_generate(
            &self,
            _req: &ChatRequest,
            mut resp: ChatResponse,
        ) -> Result<ChatResponse, LlmError> {
            if let Some(t) = resp.content_text() {
                resp.content = MessageContent::Text(format!("{}{}", t, self.0));
            }
            Ok(resp)
        }
    }

    #[test]
    fn transform_chain_applies_in_order() {
        let mws: Vec<Arc<dyn LanguageModelMiddleware>> = vec![
            Arc::new(AppendPromptSuffix("-a")),
            Arc::new(AppendPromptSuffix("-b")),
        ];
        let out = apply_transform_chain(&mws, ChatRequest::new("base"));
        assert_eq!(out.prompt, "base-a-b");
    }

    #[test]
    fn post_generate_chain_applies_in_order() {
        let mws: Vec<Arc<dyn LanguageModelMiddleware>> = vec![
            Arc::new(PostAppendSuffix("-a")),
            Arc::new(PostAppendSuffix("-b")),
        ];
        let base = ChatResponse::new(MessageContent::Text("x".into()));
        let out = apply_post_generate_chain(&mws, &ChatRequest::new(""), base).unwrap();
        assert_eq!(out.content_text().as_deref(), Some("x-a-b"));
    }

    struct DoublingStage;
    impl StreamStage for DoublingStage {
        fn on_event(&mut self, ev: ChatStreamEvent) -> Result<Vec<ChatStreamEvent>, LlmError> {
            Ok(vec![ev.clone(), ev])
        }
    }

    #[test]
    fn stream_stage_chain_fans_out() {
        let mut stages: Vec<Box<dyn StreamStage>> =
            vec![Box::new(DoublingStage), Box::new(DoublingStage)];
        let out = apply_stream_stage_chain(
            &mut stages,
            ChatStreamEvent::ContentDelta {
                delta: "x".to_string(),
            },
        )
        .unwrap();
        assert_eq!(out.len(), 4);
    }
}
