//! HTTP backend for OpenAI-compatible chat-completion endpoints.
//!
//! Each provider's endpoint is the full completions URL; the credential goes
//! out as a Bearer token. One request per call, awaited in place.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crowecode_core::types::{CompletionRequest, CompletionResponse};
use crowecode_core::utils::truncate_string;

use crate::error::ProviderError;
use crate::registry::Provider;
use crate::traits::CompletionBackend;

/// Request timeout for upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How much of a vendor error body goes into the logs.
const MAX_LOGGED_BODY: usize = 500;

// ─────────────────────────────────────────────
// HttpBackend
// ─────────────────────────────────────────────

/// Talks to any endpoint honoring the `{model, messages, temperature,
/// max_tokens}` → `{choices: [{message: {content}}]}` envelope.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// HTTP client (shared across requests).
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a backend with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build configured HTTP client, using defaults");
                reqwest::Client::new()
            });

        HttpBackend { client }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn complete(
        &self,
        provider: &Provider,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        debug!(
            provider = %provider.key,
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            "calling provider"
        );

        let response = self
            .client
            .post(&provider.endpoint)
            .bearer_auth(provider.credential())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = %provider.key, error = %e, "HTTP request failed");
                ProviderError::Transport {
                    provider: provider.key.clone(),
                    source: e,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = %provider.key,
                status = status.as_u16(),
                body = %truncate_string(&body, MAX_LOGGED_BODY),
                "provider error"
            );
            return Err(ProviderError::Status {
                provider: provider.key.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope = response.json::<CompletionResponse>().await.map_err(|e| {
            error!(provider = %provider.key, error = %e, "failed to decode completion envelope");
            ProviderError::MalformedEnvelope {
                provider: provider.key.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(
            provider = %provider.key,
            choices = envelope.choices.len(),
            "provider response received"
        );
        Ok(envelope)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
