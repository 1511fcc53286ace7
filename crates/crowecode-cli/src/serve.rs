//! Serve command — binds the HTTP API and runs until Ctrl+C.
//!
//! Startup sequence:
//! 1. Build the provider registry and service from config
//! 2. Print the banner with registered providers
//! 3. Bind the listener and serve the router
//! 4. Ctrl+C triggers graceful shutdown

use anyhow::{Context, Result};
use tracing::info;

use crowecode_api::ApiOptions;
use crowecode_core::config::Config;

use crate::helpers;

/// Run the HTTP API.
pub async fn run(config: Config) -> Result<()> {
    helpers::print_banner();
    println!("  Mode: Server");
    println!();

    let service = crate::build_service(&config);
    let status = service.registry().status();
    let address = config.server.bind_address();

    info!(
        address = %address,
        active = %status.active,
        registered = ?status.registered,
        skipped = ?status.skipped,
        "server starting"
    );

    println!("  Listening: http://{address}");
    println!("  Active:    {}", status.active);
    println!(
        "  Providers: {} registered ({})",
        status.registered.len(),
        status.registered.join(", ")
    );
    println!(
        "  Operator:  provider switch {}",
        if config.server.admin_token().is_some() {
            "enabled (bearer token)"
        } else {
            "disabled (no server.adminToken)"
        }
    );
    println!();

    if !status.active_resolves {
        println!("  ⚠  Active provider '{}' has no credential.", status.active);
        println!("     Requests will fail until XAI_API_KEY, ANTHROPIC_API_KEY");
        println!("     or OPENAI_API_KEY is set, or a key is added to the config.");
        println!();
    }

    println!("  Ctrl+C to stop");
    println!();

    let options = ApiOptions {
        admin_token: config.server.admin_token().map(str::to_string),
        ..Default::default()
    };
    let app = crowecode_api::router(service, options);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    println!("  Server stopped. Goodbye!");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    println!();
    println!("  Shutting down...");
    info!("received Ctrl+C, shutting down");
}
