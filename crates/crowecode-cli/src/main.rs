//! CroweCode CLI — entry point.
//!
//! # Commands
//!
//! - `crowecode serve [--logs]` — run the HTTP API
//! - `crowecode ask -m MESSAGE` / `crowecode ask --analyze FILE` — one request, printed
//! - `crowecode onboard` — write a default config file
//! - `crowecode status` — show configuration and provider status

mod ask;
mod helpers;
mod onboard;
mod serve;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crowecode_core::config::{load_config, Config};
use crowecode_providers::{HttpBackend, IntelligenceService, ProviderRegistry};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// CroweCode Intelligence — branded AI chat and code analysis service
#[derive(Parser)]
#[command(name = "crowecode", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.crowecode/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Send a single request through the configured provider
    Ask {
        /// Chat message. Required unless --analyze is given.
        #[arg(short, long, required_unless_present = "analyze")]
        message: Option<String>,

        /// Analyze a source file instead of chatting
        #[arg(long, conflicts_with = "message")]
        analyze: Option<PathBuf>,

        /// Use this provider key instead of the configured active one
        #[arg(long)]
        provider: Option<String>,

        /// Sampling temperature for chat
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default configuration file
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs);
            let mut config = load_config(config_path.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve::run(config).await
        }
        Commands::Ask {
            message,
            analyze,
            provider,
            temperature,
            logs,
        } => {
            init_logging(logs);
            let config = load_config(config_path.as_deref());
            let options = ask::AskOptions {
                message,
                analyze,
                provider,
                temperature,
            };
            ask::run(&config, options).await
        }
        Commands::Onboard => onboard::run(config_path.as_deref()),
        Commands::Status => status::run(config_path.as_deref()),
    }
}

/// Build the request pipeline from the loaded configuration.
pub fn build_service(config: &Config) -> IntelligenceService {
    let registry = ProviderRegistry::from_config(&config.providers, &config.active_provider);
    IntelligenceService::new(Arc::new(registry), Arc::new(HttpBackend::new()))
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("crowecode=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
