//! Streaming reasoning-extraction tests.
//!
//! A scripted backend streams its prompt back in small chunks, so marker
//! tags land split across chunk boundaries. The wrapped handle must route
//! in-marker content to `ThinkingDelta`, keep answer deltas incremental, and
//! fail the invocation on an unterminated marker.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use modelgate::prelude::*;

/// Streams the request prompt back in fixed-size chunks.
struct ScriptedModel {
    chunk_size: usize,
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse::new(MessageContent::Text(request.prompt)))
    }

    async fn stream(&self, request: ChatRequest) -> Result<ChatStream, LlmError> {
        let mut events: Vec<Result<ChatStreamEvent, LlmError>> = vec![Ok(
            ChatStreamEvent::StreamStart {
                model: Some("scripted".to_string()),
            },
        )];
        let text = request.prompt;
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(self.chunk_size) {
            events.push(Ok(ChatStreamEvent::ContentDelta {
                delta: chunk.iter().collect(),
            }));
        }
        events.push(Ok(ChatStreamEvent::StreamEnd {
            response: ChatResponse::new(MessageContent::Text(text)),
        }));
        Ok(Box::pin(futures_util::stream::iter(events)))
    }
}

/// A backend that never produces anything; used for cancellation tests.
struct PendingModel;

#[async_trait]
impl LanguageModel for PendingModel {
    async fn generate(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
        unreachable!("not used in streaming tests")
    }

    async fn stream(&self, _request: ChatRequest) -> Result<ChatStream, LlmError> {
        Ok(Box::pin(futures_util::stream::pending()))
    }
}

fn wrapped(chunk_size: usize) -> Arc<dyn LanguageModel> {
    wrap_language_model(
        Arc::new(ScriptedModel { chunk_size }),
        vec![Arc::new(ExtractReasoningMiddleware::new("think").unwrap())],
    )
}

/// Drain a stream into (answer, reasoning, final response, errors).
async fn drain(
    mut stream: ChatStream,
) -> (String, String, Option<ChatResponse>, Vec<LlmError>) {
    let mut answer = String::new();
    let mut reasoning = String::new();
    let mut final_response = None;
    let mut errors = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(ChatStreamEvent::ContentDelta { delta }) => answer.push_str(&delta),
            Ok(ChatStreamEvent::ThinkingDelta { delta }) => reasoning.push_str(&delta),
            Ok(ChatStreamEvent::StreamEnd { response }) => final_response = Some(response),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }
    (answer, reasoning, final_response, errors)
}

#[tokio::test]
async fn splits_channels_even_when_markers_span_chunks() {
    // Chunk size 3 splits "<think>" and "</think>" across deltas.
    let model = wrapped(3);
    let stream = model
        .stream(ChatRequest::new("hello <think>because X</think> world"))
        .await
        .unwrap();
    let (answer, reasoning, final_response, errors) = drain(stream).await;

    assert!(errors.is_empty());
    assert_eq!(answer, "hello  world");
    assert_eq!(reasoning, "because X");

    // The rebuilt final response matches the split channels.
    let response = final_response.expect("stream end");
    assert_eq!(response.content_text().as_deref(), Some("hello  world"));
    assert_eq!(response.reasoning(), vec!["because X"]);
}

#[tokio::test]
async fn unmarked_output_is_unchanged() {
    let model = wrapped(4);
    let stream = model
        .stream(ChatRequest::new("hello world"))
        .await
        .unwrap();
    let (answer, reasoning, final_response, errors) = drain(stream).await;

    assert!(errors.is_empty());
    assert_eq!(answer, "hello world");
    assert_eq!(reasoning, "");
    let response = final_response.expect("stream end");
    assert_eq!(response.content_text().as_deref(), Some("hello world"));
    assert!(!response.has_reasoning());
}

#[tokio::test]
async fn answer_deltas_arrive_before_stream_end() {
    // Incremental delivery: resolved answer content must not be withheld
    // until the stream completes.
    let model = wrapped(5);
    let mut stream = model
        .stream(ChatRequest::new("hello <think>x</think> world"))
        .await
        .unwrap();

    let mut saw_content_before_end = false;
    while let Some(item) = stream.next().await {
        match item.unwrap() {
            ChatStreamEvent::ContentDelta { .. } => saw_content_before_end = true,
            ChatStreamEvent::StreamEnd { .. } => break,
            _ => {}
        }
    }
    assert!(saw_content_before_end);
}

#[tokio::test]
async fn unterminated_marker_fails_the_stream() {
    let model = wrapped(4);
    let stream = model
        .stream(ChatRequest::new("hello <think>never closed"))
        .await
        .unwrap();
    let (_, _, final_response, errors) = drain(stream).await;

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        LlmError::MalformedReasoningOutput(_)
    ));
    // The invocation failed; no final response was delivered.
    assert!(final_response.is_none());
}

#[tokio::test]
async fn concurrent_invocations_do_not_share_parse_state() {
    let model = wrapped(3);

    let first = model.stream(ChatRequest::new("one <think>alpha</think> done"));
    let second = model.stream(ChatRequest::new("two <think>beta</think> end"));
    let (first, second) = tokio::join!(first, second);

    let (first, second) = tokio::join!(drain(first.unwrap()), drain(second.unwrap()));

    assert_eq!(first.0, "one  done");
    assert_eq!(first.1, "alpha");
    assert_eq!(second.0, "two  end");
    assert_eq!(second.1, "beta");
}

#[tokio::test]
async fn later_marker_pairs_pass_through_verbatim() {
    let model = wrapped(4);
    let stream = model
        .stream(ChatRequest::new("a <think>x</think> b <think>y</think> c"))
        .await
        .unwrap();
    let (answer, reasoning, _, errors) = drain(stream).await;

    assert!(errors.is_empty());
    assert_eq!(answer, "a  b <think>y</think> c");
    assert_eq!(reasoning, "x");
}

#[tokio::test]
async fn cancellation_terminates_a_wrapped_stream() {
    let model = wrap_language_model(
        Arc::new(PendingModel),
        vec![Arc::new(ExtractReasoningMiddleware::new("think").unwrap())],
    );
    let handle = model
        .stream_with_cancel(ChatRequest::new("hi"))
        .await
        .unwrap();

    let ChatStreamHandle { mut stream, cancel } = handle;
    let waiter = tokio::spawn(async move { stream.next().await });
    tokio::task::yield_now().await;

    cancel.cancel();

    let out = tokio::time::timeout(std::time::Duration::from_millis(200), waiter)
        .await
        .expect("cancel should end the stream")
        .expect("task ok");
    assert!(out.is_none());
}

#[tokio::test]
async fn non_stream_path_matches_the_streamed_split() {
    let model = wrapped(3);
    let resp = model
        .generate(ChatRequest::new("hello <think>because X</think> world"))
        .await
        .unwrap();

    assert_eq!(resp.content_text().as_deref(), Some("hello  world"));
    assert_eq!(resp.reasoning(), vec!["because X"]);
}
