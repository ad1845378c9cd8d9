//! Extract reasoning/thinking content from model output.
//!
//! Some backend models emit their intermediate rationale inline, delimited by
//! a marker tag (e.g. `<think>...</think>`). This middleware splits that
//! output into a reasoning channel and a final-answer channel, removing the
//! marker pair and its contents from the answer, without changing the wrapped
//! model's invocation contract.

use crate::error::LlmError;
use crate::middleware::language_model::{LanguageModelMiddleware, StreamStage};
use crate::middleware::tag_extractor::{TagConfig, TagExtractor, UnterminatedTagError};
use crate::types::{ChatRequest, ChatResponse, ChatStreamEvent, ContentPart, MessageContent};

/// Preset reasoning tag configurations for different model families.
pub struct ReasoningTagPresets;

impl ReasoningTagPresets {
    /// `<think>...</think>` (default; DeepSeek, Qwen, most open models).
    pub fn think() -> TagConfig {
        TagConfig::for_tag_name("think")
    }

    /// `<thought>...</thought>` (Gemini).
    pub fn thought() -> TagConfig {
        TagConfig::for_tag_name("thought")
    }

    /// `<reasoning>...</reasoning>` (gpt-oss style models).
    pub fn reasoning() -> TagConfig {
        TagConfig::for_tag_name("reasoning")
    }

    /// Pick the tag configuration a model is known to emit.
    pub fn for_model(model_id: &str) -> TagConfig {
        let model_lower = model_id.to_lowercase();
        if model_lower.contains("gemini") {
            Self::thought()
        } else if model_lower.contains("gpt-oss") || model_lower.contains("gpt_oss") {
            Self::reasoning()
        } else {
            Self::think()
        }
    }
}

/// Middleware that splits tag-delimited reasoning out of model output.
///
/// Behavior per response:
/// - no markers: the reasoning channel stays empty and the answer passes
///   through unchanged;
/// - one marker pair: content between the markers becomes reasoning, the
///   marker pair and its contents are removed from the answer, any further
///   marker occurrences pass through verbatim;
/// - an opening marker that never closes fails the invocation with
///   [`LlmError::MalformedReasoningOutput`].
#[derive(Debug)]
pub struct ExtractReasoningMiddleware {
    config: TagConfig,
}

impl ExtractReasoningMiddleware {
    /// Create a middleware for a bare tag name (e.g. `"think"`).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the tag name is empty.
    pub fn new(tag_name: &str) -> Result<Self, LlmError> {
        if tag_name.is_empty() {
            return Err(LlmError::ConfigurationError(
                "reasoning tag name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config: TagConfig::for_tag_name(tag_name),
        })
    }

    /// Create a middleware with an explicit tag configuration.
    pub fn with_tag(config: TagConfig) -> Self {
        Self { config }
    }

    /// Create a middleware with the tag the given model is known to emit.
    pub fn for_model(model_id: &str) -> Self {
        Self {
            config: ReasoningTagPresets::for_model(model_id),
        }
    }
}

fn malformed(err: UnterminatedTagError) -> LlmError {
    LlmError::MalformedReasoningOutput(err.to_string())
}

impl LanguageModelMiddleware for ExtractReasoningMiddleware {
    fn post_generate(
        &self,
        _req: &ChatRequest,
        resp: ChatResponse,
    ) -> Result<ChatResponse, LlmError> {
        // The provider may already have split reasoning natively.
        if resp.has_reasoning() {
            return Ok(resp);
        }

        let Some(text) = resp.content.text() else {
            return Ok(resp);
        };

        let mut extractor = TagExtractor::new(self.config.clone());
        let mut answer = String::new();
        let mut reasoning = String::new();
        for span in extractor.process_text(&text) {
            if span.is_reasoning {
                reasoning.push_str(&span.content);
            } else {
                answer.push_str(&span.content);
            }
        }
        if let Some(span) = extractor.finalize().map_err(malformed)? {
            answer.push_str(&span.content);
        }

        if reasoning.is_empty() {
            return Ok(resp);
        }

        tracing::debug!(
            reasoning_len = reasoning.len(),
            "extracted reasoning segment from response"
        );

        let mut resp = resp;
        resp.content = MessageContent::MultiModal(vec![
            ContentPart::text(answer),
            ContentPart::reasoning(reasoning),
        ]);
        Ok(resp)
    }

    fn stream_stage(&self) -> Option<Box<dyn StreamStage>> {
        Some(Box::new(ExtractReasoningStage {
            extractor: TagExtractor::new(self.config.clone()),
            answer: String::new(),
            reasoning: String::new(),
            done: false,
        }))
    }
}

/// Per-invocation streaming stage: routes in-marker spans to
/// [`ChatStreamEvent::ThinkingDelta`] and strips them from the answer deltas.
struct ExtractReasoningStage {
    extractor: TagExtractor,
    answer: String,
    reasoning: String,
    done: bool,
}

impl ExtractReasoningStage {
    fn spans_to_events(&mut self, text: &str) -> Vec<ChatStreamEvent> {
        self.extractor
            .process_text(text)
            .into_iter()
            .map(|span| {
                if span.is_reasoning {
                    self.reasoning.push_str(&span.content);
                    ChatStreamEvent::ThinkingDelta {
                        delta: span.content,
                    }
                } else {
                    self.answer.push_str(&span.content);
                    ChatStreamEvent::ContentDelta {
                        delta: span.content,
                    }
                }
            })
            .collect()
    }

    /// Flush the extractor at end of response. Fails on an unterminated marker.
    fn finish(&mut self) -> Result<Vec<ChatStreamEvent>, LlmError> {
        self.done = true;
        let trailing = self.extractor.finalize().map_err(malformed)?;
        Ok(match trailing {
            Some(span) => {
                self.answer.push_str(&span.content);
                vec![ChatStreamEvent::ContentDelta {
                    delta: span.content,
                }]
            }
            None => Vec::new(),
        })
    }
}

impl StreamStage for ExtractReasoningStage {
    fn on_event(&mut self, ev: ChatStreamEvent) -> Result<Vec<ChatStreamEvent>, LlmError> {
        match ev {
            ChatStreamEvent::ContentDelta { delta } => Ok(self.spans_to_events(&delta)),
            ChatStreamEvent::ThinkingDelta { delta } => {
                // Provider-native reasoning: pass through, keep for the final
                // response rebuild.
                self.reasoning.push_str(&delta);
                Ok(vec![ChatStreamEvent::ThinkingDelta { delta }])
            }
            ChatStreamEvent::StreamEnd { response } => {
                let mut events = self.finish()?;
                let mut response = response;
                if !self.reasoning.is_empty() {
                    // Rebuild the final response so it matches the split
                    // channels the stream delivered.
                    response.content = MessageContent::MultiModal(vec![
                        ContentPart::text(std::mem::take(&mut self.answer)),
                        ContentPart::reasoning(std::mem::take(&mut self.reasoning)),
                    ]);
                }
                events.push(ChatStreamEvent::StreamEnd { response });
                Ok(events)
            }
            other => Ok(vec![other]),
        }
    }

    fn finalize(&mut self) -> Result<Vec<ChatStreamEvent>, LlmError> {
        if self.done {
            return Ok(Vec::new());
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(text: &str) -> ChatResponse {
        ChatResponse::new(MessageContent::Text(text.to_string()))
    }

    #[test]
    fn splits_reasoning_from_answer() {
        let mw = ExtractReasoningMiddleware::new("think").unwrap();
        let req = ChatRequest::new("");
        let out = mw
            .post_generate(&req, respond("hello <think>because X</think> world"))
            .unwrap();

        assert_eq!(out.reasoning(), vec!["because X"]);
        assert_eq!(out.content_text().as_deref(), Some("hello  world"));
    }

    #[test]
    fn no_markers_is_identity() {
        let mw = ExtractReasoningMiddleware::new("think").unwrap();
        let req = ChatRequest::new("");
        let out = mw.post_generate(&req, respond("hello world")).unwrap();

        assert!(out.reasoning().is_empty());
        assert_eq!(out.content_text().as_deref(), Some("hello world"));
    }

    #[test]
    fn unterminated_marker_fails_the_invocation() {
        let mw = ExtractReasoningMiddleware::new("think").unwrap();
        let req = ChatRequest::new("");
        let err = mw
            .post_generate(&req, respond("hello <think>never closed"))
            .unwrap_err();
        assert!(matches!(err, LlmError::MalformedReasoningOutput(_)));
    }

    #[test]
    fn second_pair_is_left_verbatim() {
        let mw = ExtractReasoningMiddleware::new("think").unwrap();
        let req = ChatRequest::new("");
        let out = mw
            .post_generate(&req, respond("a <think>x</think> b <think>y</think>"))
            .unwrap();
        assert_eq!(out.reasoning(), vec!["x"]);
        assert_eq!(out.content_text().as_deref(), Some("a  b <think>y</think>"));
    }

    #[test]
    fn provider_extracted_reasoning_is_kept() {
        let mw = ExtractReasoningMiddleware::new("think").unwrap();
        let req = ChatRequest::new("");
        let resp = ChatResponse::new(MessageContent::MultiModal(vec![
            ContentPart::text("answer"),
            ContentPart::reasoning("provider extracted"),
        ]));
        let out = mw.post_generate(&req, resp).unwrap();
        assert_eq!(out.reasoning(), vec!["provider extracted"]);
    }

    #[test]
    fn empty_tag_name_is_rejected() {
        let err = ExtractReasoningMiddleware::new("").unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn for_model_picks_known_tags() {
        assert_eq!(
            ReasoningTagPresets::for_model("gemini-2.5-pro").opening_tag,
            "<thought>"
        );
        assert_eq!(
            ReasoningTagPresets::for_model("deepseek-reasoner").opening_tag,
            "<think>"
        );
    }
}
