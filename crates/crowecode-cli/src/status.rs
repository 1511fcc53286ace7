//! `crowecode status` — show configuration and provider status.
//!
//! - Shows config path and server bind address
//! - Shows credential status for each provider slot
//! - Shows the active provider key and whether it resolves

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crowecode_core::config::{get_config_path, load_config};
use crowecode_providers::{ProviderRegistry, VENDORS};

/// Run the status command.
pub fn run(path: Option<&Path>) -> Result<()> {
    let config = load_config(path);
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    println!();
    println!("{}", "◆ CroweCode Status".cyan().bold());
    println!();

    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
    println!(
        "  {:<18} {}",
        "Server:".bold(),
        config.server.bind_address()
    );
    println!(
        "  {:<18} {}",
        "Operator switch:".bold(),
        if config.server.admin_token().is_some() {
            format!("{} (token set)", "✓".green())
        } else {
            format!("{}", "· disabled".dimmed())
        }
    );

    println!();
    println!("  {}", "Providers:".bold());
    for spec in VENDORS {
        let configured = config
            .providers
            .get_by_name(spec.key)
            .is_some_and(|p| p.is_configured());
        let status = if configured {
            format!("{} (key set)", "✓".green())
        } else {
            format!("{}", "· not configured".dimmed())
        };
        println!(
            "    {:<10} {:<30} {}",
            spec.key,
            format!("{} [{}]", spec.display_name, spec.env_key).dimmed(),
            status
        );
    }

    let registry = ProviderRegistry::from_config(&config.providers, &config.active_provider);
    let active = registry.active_key();
    let active_status = if registry.get_active().is_some() {
        "✓".green().to_string()
    } else {
        "(not configured)".red().to_string()
    };
    println!();
    println!("  {:<18} {} {}", "Active:".bold(), active, active_status);
    println!();

    Ok(())
}
