//! Provider layer for CroweCode Intelligence.
//!
//! # Architecture
//!
//! - [`registry`] — vendor table, `ProviderRegistry` and the active selection
//! - [`translator`] — caller request → upstream completion envelope
//! - [`traits::CompletionBackend`] — trait for making the upstream call
//! - [`http_provider::HttpBackend`] — reqwest implementation of the backend
//! - [`normalizer`] — upstream envelope → public reply contract
//! - [`service::IntelligenceService`] — the whole pipeline, one call per request

pub mod error;
pub mod http_provider;
pub mod normalizer;
pub mod registry;
pub mod service;
pub mod traits;
pub mod translator;

// Re-export main types for convenience
pub use error::ProviderError;
pub use http_provider::HttpBackend;
pub use normalizer::AnalysisOutcome;
pub use registry::{Provider, ProviderRegistry, RegistryStatus, VendorSpec, VENDORS};
pub use service::{IntelligenceService, Reply, ServiceError};
pub use traits::CompletionBackend;
