//! Response normalizer — maps a vendor envelope onto our public contract.
//!
//! Chat mode is strict: no `choices[0].message.content` means the envelope
//! is malformed. Analysis mode is lenient about the *content*: models are
//! asked for JSON but don't always comply, so prose degrades to a report
//! carrying the raw text.

use serde::Serialize;
use tracing::debug;

use crowecode_core::types::{AnalysisReport, ChatReply, CompletionResponse};

use crate::error::ProviderError;

/// Result of the best-effort analysis parse.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    /// The model emitted a JSON object. Returned as-is, without checking
    /// that the five expected keys are present or well-typed.
    Parsed(serde_json::Value),
    /// No usable JSON; `documentation` holds the raw content.
    Fallback(AnalysisReport),
}

impl AnalysisOutcome {
    /// Whether the model's JSON was used.
    pub fn is_parsed(&self) -> bool {
        matches!(self, AnalysisOutcome::Parsed(_))
    }

    /// View the outcome as a typed report.
    ///
    /// Parsed objects that don't fit the report shape are rendered into
    /// `documentation` as JSON text.
    pub fn to_report(&self) -> AnalysisReport {
        match self {
            AnalysisOutcome::Parsed(value) => serde_json::from_value(value.clone())
                .unwrap_or_else(|_| AnalysisReport::from_raw_text(value.to_string())),
            AnalysisOutcome::Fallback(report) => report.clone(),
        }
    }
}

/// Pull `choices[0].message.content` out of the envelope.
pub fn extract_content(
    provider_key: &str,
    envelope: &CompletionResponse,
) -> Result<String, ProviderError> {
    envelope
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| ProviderError::MalformedEnvelope {
            provider: provider_key.to_string(),
            reason: if envelope.choices.is_empty() {
                "no choices in response".to_string()
            } else {
                "choice has no message content".to_string()
            },
        })
}

/// Chat mode: the content verbatim, wrapped in the branded reply.
pub fn normalize_chat(content: String) -> ChatReply {
    ChatReply::new(content)
}

/// Analysis mode: parse the embedded JSON object if there is one.
pub fn normalize_analysis(content: &str) -> AnalysisOutcome {
    let Some(candidate) = embedded_object(content) else {
        debug!("no JSON object in analysis content, using raw text");
        return AnalysisOutcome::Fallback(AnalysisReport::from_raw_text(content));
    };

    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(value) => AnalysisOutcome::Parsed(value),
        Err(e) => {
            debug!(error = %e, "embedded analysis JSON did not parse, using raw text");
            AnalysisOutcome::Fallback(AnalysisReport::from_raw_text(content))
        }
    }
}

/// The span from the first `{` to the last `}` inclusive, if both exist in
/// that order. Covers JSON wrapped in prose or in a fenced code block.
fn embedded_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
