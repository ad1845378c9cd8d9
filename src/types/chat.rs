//! Chat request and response types.

use serde::{Deserialize, Serialize};

/// A chat generation request routed to a backend model.
///
/// The routing layer does not interpret the prompt; it only carries it to the
/// resolved handle. Provider-specific parameters stay with the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Logical model id this request was resolved under, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The user prompt.
    pub prompt: String,
}

impl ChatRequest {
    /// Create a request from a user prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            system: None,
            prompt: prompt.into(),
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the logical model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation.
    Stop,
    /// Token limit reached.
    Length,
    /// Provider filtered the content.
    ContentFilter,
    /// Anything else the provider reports.
    Other,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens.
    pub total_tokens: u32,
}

/// Content part - a single span of model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    /// Final-answer text.
    Text {
        /// The text content.
        text: String,
    },
    /// Reasoning/thinking content, split out from the answer by middleware or
    /// extracted natively by the provider.
    Reasoning {
        /// The reasoning content.
        text: String,
    },
}

impl ContentPart {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a reasoning part.
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning { text: text.into() }
    }

    /// Whether this part is final-answer text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

/// Message content - plain text or a sequence of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// Multiple typed parts (answer text interleaved with reasoning).
    MultiModal(Vec<ContentPart>),
}

impl MessageContent {
    /// The final-answer text, if any.
    ///
    /// For multi-part content this concatenates all text parts in order;
    /// reasoning parts are excluded.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::MultiModal(parts) => {
                let mut out = String::new();
                let mut found = false;
                for part in parts {
                    if let ContentPart::Text { text } = part {
                        out.push_str(text);
                        found = true;
                    }
                }
                found.then_some(out)
            }
        }
    }

    /// All reasoning spans in order.
    pub fn reasoning(&self) -> Vec<&str> {
        match self {
            Self::Text(_) => Vec::new(),
            Self::MultiModal(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Reasoning { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// A chat response from a backend model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response id assigned by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The response content.
    pub content: MessageContent,
    /// Concrete model that served the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Usage statistics, when the provider reports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Finish reason, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl ChatResponse {
    /// Create a response from content alone.
    pub fn new(content: MessageContent) -> Self {
        Self {
            id: None,
            content,
            model: None,
            usage: None,
            finish_reason: None,
        }
    }

    /// Create an empty response (used for stream end bookkeeping).
    pub fn empty() -> Self {
        Self::new(MessageContent::Text(String::new()))
    }

    /// The final-answer text of the response, if any.
    pub fn content_text(&self) -> Option<String> {
        self.content.text()
    }

    /// All reasoning spans of the response.
    pub fn reasoning(&self) -> Vec<&str> {
        self.content.reasoning()
    }

    /// Whether the response carries reasoning content.
    pub fn has_reasoning(&self) -> bool {
        !self.reasoning().is_empty()
    }
}
