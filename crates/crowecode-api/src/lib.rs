//! HTTP API for CroweCode Intelligence.
//!
//! [`routes::router`] wires an [`IntelligenceService`](crowecode_providers::IntelligenceService)
//! into an axum `Router`. Callers only ever see brand-controlled strings;
//! see [`error`] for how failures are rendered.

pub mod capabilities;
pub mod error;
pub mod routes;

pub use capabilities::{Capabilities, HealthReport};
pub use error::{ApiError, ErrorBody};
pub use routes::{router, ApiOptions, AppState};
