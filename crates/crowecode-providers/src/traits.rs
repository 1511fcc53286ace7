//! Completion backend trait — the seam between the pipeline and the network.
//!
//! `HttpBackend` in `http_provider.rs` is the production implementation.
//! Tests and the CLI can plug in anything else that speaks the envelope.

use async_trait::async_trait;
use crowecode_core::types::{CompletionRequest, CompletionResponse};

use crate::error::ProviderError;
use crate::registry::Provider;

/// Sends one completion request to one provider.
///
/// Implementations make exactly one attempt: no retries and no fallback to
/// another provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `request` to `provider` and decode the response envelope.
    ///
    /// # Errors
    /// - [`ProviderError::Transport`] if no response was received.
    /// - [`ProviderError::Status`] on a non-2xx response.
    /// - [`ProviderError::MalformedEnvelope`] if the body can't be decoded.
    async fn complete(
        &self,
        provider: &Provider,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;
}
