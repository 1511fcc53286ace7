//! Errors raised while talking to an upstream provider.
//!
//! These carry full detail (registry key, HTTP status, vendor body) for
//! server-side logs. They must never be rendered to API callers as-is; the
//! API layer maps them onto fixed branded messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, timeout…).
    #[error("request to provider '{provider}' failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor answered with a non-2xx status.
    #[error("provider '{provider}' returned HTTP {status}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// The vendor answered 2xx but the body isn't a completion envelope,
    /// or `choices[0].message.content` is missing.
    #[error("malformed completion envelope from provider '{provider}': {reason}")]
    MalformedEnvelope { provider: String, reason: String },
}

impl ProviderError {
    /// Whether this failure should be reported as "upstream unavailable"
    /// rather than an internal error.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            ProviderError::Transport { .. } | ProviderError::Status { .. }
        )
    }

    /// HTTP status returned by the vendor, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
