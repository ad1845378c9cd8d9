//! Streaming tag extraction.
//!
//! A state machine that splits streaming text into answer and reasoning spans
//! delimited by an opening/closing marker pair. Markers may be split across
//! chunk boundaries; only as much text as a potential marker prefix is ever
//! buffered, so resolved spans are forwarded as soon as they are unambiguous.
//!
//! Only the first open/close pair per response is honored: once it closes,
//! all remaining text (further markers included) passes through verbatim as
//! answer text. A marker that opens but never closes before the stream ends
//! is reported by [`TagExtractor::finalize`] as an error, since it signals a
//! mismatch with the backend model's emission format.

use std::fmt;

/// Tag configuration for extraction.
#[derive(Debug, Clone)]
pub struct TagConfig {
    /// Opening marker (e.g. `<think>`).
    pub opening_tag: String,
    /// Closing marker (e.g. `</think>`).
    pub closing_tag: String,
}

impl TagConfig {
    /// Create a configuration from explicit markers.
    pub fn new(opening_tag: impl Into<String>, closing_tag: impl Into<String>) -> Self {
        Self {
            opening_tag: opening_tag.into(),
            closing_tag: closing_tag.into(),
        }
    }

    /// Create a configuration from a bare tag name ("think" -> `<think>`).
    pub fn for_tag_name(name: &str) -> Self {
        Self::new(format!("<{name}>"), format!("</{name}>"))
    }
}

/// A resolved span of streamed text.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpan {
    /// The span content, marker text removed.
    pub content: String,
    /// Whether the span came from inside the marker pair.
    pub is_reasoning: bool,
}

/// The stream ended while inside an open marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedTagError {
    /// The opening marker that was never closed.
    pub opening_tag: String,
}

impl fmt::Display for UnterminatedTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream ended inside an open {} marker", self.opening_tag)
    }
}

impl std::error::Error for UnterminatedTagError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BeforeTag,
    InsideTag,
    AfterTag,
}

/// Streaming tag extractor.
///
/// Each response gets its own extractor; state is never shared across
/// invocations. Feed chunks through [`process_text`](Self::process_text) and
/// call [`finalize`](Self::finalize) when the stream ends.
pub struct TagExtractor {
    config: TagConfig,
    buffer: String,
    phase: Phase,
}

impl TagExtractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: TagConfig) -> Self {
        Self {
            config,
            buffer: String::new(),
            phase: Phase::BeforeTag,
        }
    }

    /// Process a chunk of text and return the spans resolved by it.
    pub fn process_text(&mut self, new_text: &str) -> Vec<TagSpan> {
        if self.phase == Phase::AfterTag && self.buffer.is_empty() {
            // First pair already closed: verbatim passthrough.
            if new_text.is_empty() {
                return Vec::new();
            }
            return vec![TagSpan {
                content: new_text.to_string(),
                is_reasoning: false,
            }];
        }

        self.buffer.push_str(new_text);
        let mut spans = Vec::new();

        loop {
            if self.phase == Phase::AfterTag {
                if !self.buffer.is_empty() {
                    spans.push(TagSpan {
                        content: std::mem::take(&mut self.buffer),
                        is_reasoning: false,
                    });
                }
                break;
            }

            let inside = self.phase == Phase::InsideTag;
            let next_tag = if inside {
                &self.config.closing_tag
            } else {
                &self.config.opening_tag
            };

            let Some(start_index) = potential_start_index(&self.buffer, next_tag) else {
                // No marker in sight: the whole buffer is resolved.
                if !self.buffer.is_empty() {
                    spans.push(TagSpan {
                        content: std::mem::take(&mut self.buffer),
                        is_reasoning: inside,
                    });
                }
                break;
            };

            if start_index > 0 {
                spans.push(TagSpan {
                    content: self.buffer[..start_index].to_string(),
                    is_reasoning: inside,
                });
            }

            if start_index + next_tag.len() <= self.buffer.len() {
                // Full marker match.
                self.buffer = self.buffer[start_index + next_tag.len()..].to_string();
                self.phase = if inside {
                    Phase::AfterTag
                } else {
                    Phase::InsideTag
                };
            } else {
                // Partial marker at the chunk boundary: hold it until the
                // next chunk disambiguates.
                self.buffer = self.buffer[start_index..].to_string();
                break;
            }
        }

        spans
    }

    /// Finish processing.
    ///
    /// Returns the trailing span still held in the buffer (text that looked
    /// like a marker prefix but never became one), or an error if the stream
    /// ended inside an open marker pair.
    pub fn finalize(&mut self) -> Result<Option<TagSpan>, UnterminatedTagError> {
        if self.phase == Phase::InsideTag {
            return Err(UnterminatedTagError {
                opening_tag: self.config.opening_tag.clone(),
            });
        }
        if self.buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(TagSpan {
            content: std::mem::take(&mut self.buffer),
            is_reasoning: false,
        }))
    }
}

/// Index where `searched_text` starts, or might start, in `text`.
///
/// Handles both complete matches and a partial match at the end of `text`
/// (the streaming case where a marker is split across chunks).
fn potential_start_index(text: &str, searched_text: &str) -> Option<usize> {
    if searched_text.is_empty() {
        return None;
    }

    if let Some(index) = text.find(searched_text) {
        return Some(index);
    }

    // Largest suffix of `text` that is a prefix of `searched_text`.
    for i in (0..text.len()).rev() {
        if !text.is_char_boundary(i) {
            continue;
        }
        let suffix = &text[i..];
        if searched_text.starts_with(suffix) {
            return Some(i);
        }
    }

    None
}
