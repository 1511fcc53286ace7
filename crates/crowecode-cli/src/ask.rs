//! `crowecode ask` — push one request through the same pipeline the HTTP
//! API uses and print the normalized result.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use crowecode_core::config::Config;
use crowecode_core::types::{ChatMessage, ChatRequest};
use crowecode_providers::{Reply, ServiceError};

use crate::helpers;

/// Parsed `ask` arguments.
#[derive(Debug)]
pub struct AskOptions {
    pub message: Option<String>,
    pub analyze: Option<PathBuf>,
    pub provider: Option<String>,
    pub temperature: Option<f64>,
}

/// Run the ask command.
pub async fn run(config: &Config, options: AskOptions) -> Result<()> {
    let service = crate::build_service(config);

    if let Some(key) = options.provider.as_deref() {
        if !service.registry().switch_active(key) {
            bail!(
                "provider '{}' is not configured (configured: {})",
                key,
                service.registry().keys().join(", ")
            );
        }
    }

    let request = build_request(&options)?;
    info!(mode = ?request.mode(), "sending request");

    match service.respond(&request).await {
        Ok(Reply::Chat(reply)) => helpers::print_response(&reply.content),
        Ok(Reply::Analysis(outcome)) => helpers::print_report(&outcome.to_report()),
        Err(ServiceError::NotConfigured { active }) => bail!(
            "no provider configured for '{}'; set XAI_API_KEY, ANTHROPIC_API_KEY or OPENAI_API_KEY",
            active
        ),
        Err(e) => return Err(e).context("request failed"),
    }

    Ok(())
}

/// Turn CLI options into the same request body the HTTP API accepts.
fn build_request(options: &AskOptions) -> Result<ChatRequest> {
    if let Some(path) = &options.analyze {
        let code = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let language = helpers::language_for_path(path);
        return Ok(ChatRequest::analyze(
            code,
            language,
            path.display().to_string(),
        ));
    }

    let Some(message) = options.message.as_deref() else {
        bail!("either --message or --analyze is required");
    };
    let mut request = ChatRequest::chat(vec![ChatMessage::user(message)]);
    request.temperature = options.temperature;
    Ok(request)
}
