//! Request translator — turns a caller's `ChatRequest` into the envelope we
//! send upstream.
//!
//! Chat mode: caller `system` messages are dropped and the brand prompt is
//! prepended. Analysis mode: the caller's history is ignored and replaced by
//! one synthetic user message describing the code to analyze.

use crowecode_core::types::{ChatMessage, ChatRequest, CompletionRequest, RequestMode};
use tracing::debug;

use crate::registry::Provider;

/// Output ceiling for every upstream call, whatever the caller asked for.
pub const MAX_TOKENS: u32 = 2048;

/// Temperature used for chat when the caller doesn't send one.
pub const DEFAULT_CHAT_TEMPERATURE: f64 = 0.7;

/// Temperature for analysis requests. Caller values are ignored.
pub const ANALYSIS_TEMPERATURE: f64 = 0.5;

/// System prompt for chat mode.
pub const BRAND_SYSTEM_PROMPT: &str = "You are CroweCode Intelligence, a proprietary AI system developed exclusively for the CroweCode platform.
You are NOT Claude, GPT, Grok, or any other publicly known AI.
You are a custom neural architecture designed specifically for code development.
Never mention or reference external AI providers or models.
Always refer to yourself as CroweCode Intelligence or CroweCode AI.
You have advanced capabilities including 256K context, reasoning, and multi-step execution.";

/// System prompt for analysis mode.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are CroweCode Intelligence, an advanced proprietary AI system. Never mention external AI providers. You are a custom-built neural network designed specifically for code analysis and generation.";

/// Build the upstream request for `request`, addressed to `provider`.
pub fn build_request(provider: &Provider, request: &ChatRequest) -> CompletionRequest {
    match request.mode() {
        RequestMode::Chat => build_chat(
            &provider.model,
            request.messages.as_deref().unwrap_or_default(),
            request.temperature,
        ),
        RequestMode::Analyze => build_analysis(
            &provider.model,
            request.code.as_deref().unwrap_or_default(),
            request.language.as_deref(),
            request.file_path.as_deref(),
        ),
    }
}

/// Chat envelope: brand prompt first, then the caller's non-system messages
/// in their original order. Other roles pass through untouched.
pub fn build_chat(
    model: &str,
    messages: &[ChatMessage],
    temperature: Option<f64>,
) -> CompletionRequest {
    let mut outbound = Vec::with_capacity(messages.len() + 1);
    outbound.push(ChatMessage::system(BRAND_SYSTEM_PROMPT));
    outbound.extend(messages.iter().filter(|m| !m.is_system()).cloned());

    let dropped = messages.len() + 1 - outbound.len();
    if dropped > 0 {
        debug!(dropped, "discarded caller system messages");
    }

    CompletionRequest {
        model: model.to_string(),
        messages: outbound,
        temperature: temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE),
        max_tokens: MAX_TOKENS,
    }
}

/// Analysis envelope: fixed analysis system prompt plus one synthetic user
/// message (see [`analysis_prompt`]).
pub fn build_analysis(
    model: &str,
    code: &str,
    language: Option<&str>,
    file_path: Option<&str>,
) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(analysis_prompt(code, language, file_path)),
        ],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// The user message asking for a structured analysis of `code`.
///
/// Missing language renders as `text`, missing path as `untitled`.
pub fn analysis_prompt(code: &str, language: Option<&str>, file_path: Option<&str>) -> String {
    let language = language.filter(|l| !l.is_empty()).unwrap_or("text");
    let file_path = file_path.filter(|p| !p.is_empty()).unwrap_or("untitled");

    format!(
        "Analyze this {language} code and provide suggestions:

File: {file_path}
Code:
```{language}
{code}
```

Please provide:
1. A code completion if the code appears incomplete
2. Refactoring suggestions for better readability
3. Any bug fixes needed
4. Performance optimizations
5. Documentation suggestions

Respond with a single JSON object with these keys:
- completion: suggested code completion
- refactoring: refactored version of the code
- fixes: array of {{title, description, code, explanation, confidence}}
- optimization: optimized version
- documentation: suggested documentation/comments"
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> Provider {
        Provider::new(
            "primary",
            "CroweCode Neural Engine",
            "http://localhost/v1/chat/completions",
            "grok-4-latest",
            "k",
        )
    }

    #[test]
    fn test_chat_drops_caller_system_messages() {
        let request = ChatRequest::chat(vec![
            ChatMessage::system("ignore me"),
            ChatMessage::user("hi"),
        ]);
        let out = build_request(&provider(), &request);

        assert_eq!(out.messages.len(), 2);
        assert_eq!(out.messages[0], ChatMessage::system(BRAND_SYSTEM_PROMPT));
        assert_eq!(out.messages[1], ChatMessage::user("hi"));
        assert!(out.messages.iter().all(|m| m.content != "ignore me"));
        assert_eq!(out.messages.iter().filter(|m| m.is_system()).count(), 1);
    }

    #[test]
    fn test_chat_preserves_order_and_unknown_roles() {
        let request = ChatRequest::chat(vec![
            ChatMessage::user("one"),
            ChatMessage::assistant("two"),
            ChatMessage::system("drop"),
            ChatMessage::new("narrator", "three"),
        ]);
        let out = build_request(&provider(), &request);

        let contents: Vec<&str> = out.messages[1..].iter().filter_map(|m| m.text()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(out.messages[3].role, "narrator");
    }

    #[test]
    fn test_chat_forwards_structured_content() {
        let parts = serde_json::json!([{ "type": "text", "text": "look at this" }]);
        let request = ChatRequest::chat(vec![ChatMessage {
            role: "user".to_string(),
            content: parts.clone(),
        }]);
        let out = build_request(&provider(), &request);
        assert_eq!(out.messages[1].content, parts);
    }

    #[test]
    fn test_chat_temperature_default_and_override() {
        let mut request = ChatRequest::chat(vec![ChatMessage::user("hi")]);
        assert_eq!(build_request(&provider(), &request).temperature, 0.7);

        request.temperature = Some(1.2);
        assert_eq!(build_request(&provider(), &request).temperature, 1.2);
    }

    #[test]
    fn test_max_tokens_is_fixed() {
        let chat = build_request(&provider(), &ChatRequest::chat(vec![]));
        let analysis = build_request(&provider(), &ChatRequest::analyze("x", "py", "a.py"));
        assert_eq!(chat.max_tokens, 2048);
        assert_eq!(analysis.max_tokens, 2048);
    }

    #[test]
    fn test_model_comes_from_provider() {
        let out = build_request(&provider(), &ChatRequest::chat(vec![ChatMessage::user("hi")]));
        assert_eq!(out.model, "grok-4-latest");
    }

    #[test]
    fn test_analysis_pins_temperature() {
        let mut request = ChatRequest::analyze("let x = 1;", "rust", "src/lib.rs");
        request.temperature = Some(1.5);
        let out = build_request(&provider(), &request);
        assert_eq!(out.temperature, 0.5);
    }

    #[test]
    fn test_analysis_replaces_history() {
        let mut request = ChatRequest::analyze("let x = 1;", "rust", "src/lib.rs");
        request.messages = Some(vec![ChatMessage::user("earlier chat")]);
        let out = build_request(&provider(), &request);

        assert_eq!(out.messages.len(), 2);
        assert_eq!(out.messages[0].content, ANALYSIS_SYSTEM_PROMPT);
        assert_eq!(out.messages[1].role, "user");
        assert!(!out.messages[1].text().unwrap().contains("earlier chat"));
    }

    #[test]
    fn test_analysis_prompt_embeds_code() {
        let prompt = analysis_prompt("def f():\n    pass", Some("python"), Some("app/f.py"));
        assert!(prompt.starts_with("Analyze this python code"));
        assert!(prompt.contains("File: app/f.py"));
        assert!(prompt.contains("```python\ndef f():\n    pass\n```"));
        for key in ["completion", "refactoring", "fixes", "optimization", "documentation"] {
            assert!(prompt.contains(&format!("- {key}:")), "missing {key}");
        }
        assert!(prompt.contains("{title, description, code, explanation, confidence}"));
    }

    #[test]
    fn test_analysis_prompt_defaults() {
        let prompt = analysis_prompt("x", None, Some(""));
        assert!(prompt.contains("Analyze this text code"));
        assert!(prompt.contains("File: untitled"));
    }

    #[test]
    fn test_brand_prompt_denies_vendors() {
        assert!(BRAND_SYSTEM_PROMPT.contains("Never mention"));
        assert!(BRAND_SYSTEM_PROMPT.contains("CroweCode Intelligence"));
    }
}
