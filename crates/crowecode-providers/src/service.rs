//! The request pipeline: resolve the active provider, translate, make one
//! upstream call, normalize.
//!
//! Shared by the HTTP handlers and the CLI. Everything is injected; there
//! is no global state.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crowecode_core::types::{ChatReply, ChatRequest, RequestMode};

use crate::error::ProviderError;
use crate::normalizer::{self, AnalysisOutcome};
use crate::registry::ProviderRegistry;
use crate::traits::CompletionBackend;
use crate::translator;

/// A normalized answer, in whichever shape the request mode calls for.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Chat(ChatReply),
    Analysis(AnalysisOutcome),
}

/// Why a request could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The active key doesn't resolve to a registered provider.
    #[error("no active provider configured (active key '{active}')")]
    NotConfigured { active: String },

    /// The request can't be translated; no upstream call was made.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: &'static str },

    /// The single upstream call failed.
    #[error("{mode:?} request failed: {source}")]
    Provider {
        mode: RequestMode,
        #[source]
        source: ProviderError,
    },
}

/// Registry + backend, cheap to clone and share across handlers.
#[derive(Clone)]
pub struct IntelligenceService {
    registry: Arc<ProviderRegistry>,
    backend: Arc<dyn CompletionBackend>,
}

impl IntelligenceService {
    pub fn new(registry: Arc<ProviderRegistry>, backend: Arc<dyn CompletionBackend>) -> Self {
        IntelligenceService { registry, backend }
    }

    /// The registry backing this service.
    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Answer one request with exactly one upstream call.
    ///
    /// The provider is resolved once up front; a concurrent switch affects
    /// only later requests.
    pub async fn respond(&self, request: &ChatRequest) -> Result<Reply, ServiceError> {
        let provider = self.registry.get_active().ok_or_else(|| {
            let active = self.registry.active_key();
            warn!(active = %active, "request received but no provider is configured");
            ServiceError::NotConfigured { active }
        })?;

        let mode = request.mode();
        if mode == RequestMode::Chat && request.messages.is_none() {
            warn!("chat request without messages");
            return Err(ServiceError::InvalidRequest {
                reason: "chat request has no messages",
            });
        }

        let outbound = translator::build_request(&provider, request);
        debug!(provider = %provider.key, ?mode, "dispatching request");

        let envelope = self
            .backend
            .complete(&provider, &outbound)
            .await
            .map_err(|source| ServiceError::Provider { mode, source })?;

        let content = normalizer::extract_content(&provider.key, &envelope)
            .map_err(|source| ServiceError::Provider { mode, source })?;

        Ok(match mode {
            RequestMode::Chat => Reply::Chat(normalizer::normalize_chat(content)),
            RequestMode::Analyze => Reply::Analysis(normalizer::normalize_analysis(&content)),
        })
    }
}

impl std::fmt::Debug for IntelligenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntelligenceService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
