//! Router and handlers.
//!
//! - `POST /api/ai` — chat or analysis
//! - `GET  /api/ai` — health report
//! - `GET  /api/ai/capabilities` — capability sheet
//! - `POST /api/ai/provider` — operator switch of the active provider,
//!   behind `Authorization: Bearer <admin token>`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crowecode_core::types::ChatRequest;
use crowecode_providers::{IntelligenceService, Reply};

use crate::capabilities::{Capabilities, HealthReport};
use crate::error::ApiError;

/// Request bodies above this size are rejected with the branded 500.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Router settings that don't belong to the provider pipeline.
#[derive(Clone)]
pub struct ApiOptions {
    /// Token required by the operator switch. `None` locks the route.
    pub admin_token: Option<String>,
    pub max_body_bytes: usize,
}

impl Default for ApiOptions {
    fn default() -> Self {
        ApiOptions {
            admin_token: None,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

impl std::fmt::Debug for ApiOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiOptions")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<set>"))
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: IntelligenceService,
    admin_token: Option<Arc<str>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<set>"))
            .finish()
    }
}

/// Build the application router around a configured service.
pub fn router(service: IntelligenceService, options: ApiOptions) -> Router {
    let admin_token = options
        .admin_token
        .filter(|t| !t.is_empty())
        .map(Arc::from);

    Router::new()
        .route("/api/ai", post(chat_handler).get(health_handler))
        .route("/api/ai/capabilities", get(capabilities_handler))
        .route("/api/ai/provider", post(switch_handler))
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .with_state(AppState {
            service,
            admin_token,
        })
}

/// Body is taken as raw bytes and parsed by hand so that an oversized or
/// unreadable body, malformed JSON, or a missing content type all land on
/// the branded 500 like any other internal failure.
async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Reply>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!(error = %rejection, "rejected unreadable chat request body");
        ApiError::Internal
    })?;
    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected unparseable chat request");
        ApiError::Internal
    })?;

    let reply = state.service.respond(&request).await?;
    Ok(Json(reply))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::from_registry(state.service.registry()))
}

async fn capabilities_handler() -> Json<Capabilities> {
    Json(Capabilities::branded())
}

/// Body of `POST /api/ai/provider`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchRequest {
    pub key: String,
}

/// Response of `POST /api/ai/provider`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SwitchResponse {
    pub switched: bool,
    pub active: String,
}

async fn switch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SwitchResponse>, ApiError> {
    authorize_operator(&headers, state.admin_token.as_deref())?;

    let body = body.map_err(|_| ApiError::BadRequest)?;
    let request: SwitchRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest)?;

    let registry = state.service.registry();
    let switched = registry.switch_active(&request.key);
    info!(requested = %request.key, switched, "provider switch requested");

    Ok(Json(SwitchResponse {
        switched,
        active: registry.active_key(),
    }))
}

/// Accept only `Authorization: Bearer <token>` matching the configured
/// operator token. With no token configured nothing is accepted.
fn authorize_operator(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        warn!("provider switch refused: no operator token configured");
        return Err(ApiError::Unauthorized);
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    if presented == Some(expected) {
        Ok(())
    } else {
        warn!(present = presented.is_some(), "provider switch refused: bad operator token");
        Err(ApiError::Unauthorized)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
