//! Wire types for CroweCode Intelligence.
//!
//! Two families live here:
//! - the **public contract** (`ChatRequest`, `ChatReply`, `AnalysisReport`)
//!   exchanged with our own clients;
//! - the **completion envelope** (`CompletionRequest`, `CompletionResponse`)
//!   exchanged with whichever upstream vendor is active.
//!
//! Nothing in the public contract may carry vendor-identifying data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Role string for system messages.
pub const ROLE_SYSTEM: &str = "system";
/// Role string for user messages.
pub const ROLE_USER: &str = "user";
/// Role string for assistant messages.
pub const ROLE_ASSISTANT: &str = "assistant";

/// A single chat message: `{role, content}`.
///
/// `role` is kept as a plain string. Callers may send roles we don't know
/// about and those are forwarded untouched; only `system` is special-cased.
/// `content` is usually a string, but structured content (an array of
/// parts, or no content at all) is forwarded as the caller sent it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
}

impl ChatMessage {
    /// Create a text message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: Value::String(content.into()),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }

    /// Whether this message carries the `system` role.
    pub fn is_system(&self) -> bool {
        self.role == ROLE_SYSTEM
    }

    /// The content when it is plain text.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

// ─────────────────────────────────────────────
// Inbound request (public contract)
// ─────────────────────────────────────────────

/// Action tag that switches a request into analysis mode.
pub const ACTION_ANALYZE: &str = "analyze";

/// Body of `POST /api/ai`.
///
/// Chat mode only uses `messages` and `temperature`; analysis mode uses
/// `code`, `language` and `file_path`. `messages` is required in chat mode
/// (an empty list is fine) and ignored in analysis mode.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Which variant of the pipeline a request runs through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMode {
    /// Free-form conversation.
    Chat,
    /// Structured code analysis returning an `AnalysisReport`.
    Analyze,
}

impl ChatRequest {
    /// Build a plain chat request from a message history.
    pub fn chat(messages: Vec<ChatMessage>) -> Self {
        ChatRequest {
            messages: Some(messages),
            ..Default::default()
        }
    }

    /// Build an analysis request for a piece of source code.
    pub fn analyze(
        code: impl Into<String>,
        language: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        ChatRequest {
            action: Some(ACTION_ANALYZE.to_string()),
            code: Some(code.into()),
            language: Some(language.into()),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }

    /// Analysis mode needs both the `analyze` action and non-empty code;
    /// anything else is treated as chat.
    pub fn mode(&self) -> RequestMode {
        let wants_analysis = self.action.as_deref() == Some(ACTION_ANALYZE);
        let has_code = self.code.as_deref().is_some_and(|c| !c.is_empty());
        if wants_analysis && has_code {
            RequestMode::Analyze
        } else {
            RequestMode::Chat
        }
    }
}

// ─────────────────────────────────────────────
// Outbound replies (public contract)
// ─────────────────────────────────────────────

/// Brand metadata attached to every chat reply. Values never vary with the
/// upstream vendor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReplyMetadata {
    pub model: String,
    pub provider: String,
    pub capabilities: String,
}

impl ReplyMetadata {
    /// The fixed metadata block.
    pub fn branded() -> Self {
        ReplyMetadata {
            model: "CroweCode Neural Engine v4.0".to_string(),
            provider: "CroweCode™ Proprietary".to_string(),
            capabilities: "Advanced Reasoning + Multi-step Execution".to_string(),
        }
    }
}

/// Chat-mode response body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub role: String,
    pub metadata: ReplyMetadata,
}

impl ChatReply {
    /// Wrap assistant text in the branded reply shape.
    pub fn new(content: impl Into<String>) -> Self {
        ChatReply {
            content: content.into(),
            role: ROLE_ASSISTANT.to_string(),
            metadata: ReplyMetadata::branded(),
        }
    }
}

/// One suggested fix inside an analysis report.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fix {
    pub title: String,
    pub description: String,
    pub code: String,
    pub explanation: String,
    pub confidence: f64,
}

/// Analysis-mode response body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisReport {
    pub completion: String,
    pub refactoring: String,
    pub fixes: Vec<Fix>,
    pub optimization: String,
    pub documentation: String,
}

impl AnalysisReport {
    /// Report used when the model answered in prose instead of JSON: the
    /// whole answer goes into `documentation`, everything else stays empty.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        AnalysisReport {
            documentation: text.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────
// Completion envelope (upstream vendor format)
// ─────────────────────────────────────────────

/// Request body for a vendor's chat-completion endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Raw chat-completion response. Only the fields we read are modelled;
/// anything else the vendor sends is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// A single choice in a completion response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

/// The assistant message inside a choice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Build a single-choice response (mostly useful in tests and mocks).
    pub fn with_content(content: impl Into<String>) -> Self {
        CompletionResponse {
            choices: vec![CompletionChoice {
                message: CompletionMessage {
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// `choices[0].message.content`, if present.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
