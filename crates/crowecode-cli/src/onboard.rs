//! `crowecode onboard` — initialize configuration.
//!
//! - Creates `~/.crowecode/config.json` with defaults (no secrets)
//! - Lists the environment variables that supply provider credentials

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crowecode_core::config::{get_config_path, save_config, Config};
use crowecode_providers::VENDORS;

/// Run the onboard command.
pub fn run(path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", "◆ CroweCode — Setup".cyan().bold());
    println!();

    let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    if write_default_config(&config_path)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!("  {}", "Credentials:".bold());
    println!("  Set any of these, or add an apiKey under providers in the config:");
    for spec in VENDORS {
        println!("    {:<20} {}", spec.env_key, format!("→ {}", spec.key).dimmed());
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Run `crowecode serve` to start the API.".green()
    );
    println!();

    Ok(())
}

/// Write a default config unless one already exists. Returns whether a
/// file was written.
///
/// Env overrides are never applied here so credentials from the
/// environment stay out of the file.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(write_default_config(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["activeProvider"], "primary");
        assert_eq!(value["providers"]["primary"]["apiKey"], "");
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"activeProvider\":\"secondary\"}").unwrap();

        assert!(!write_default_config(&path).unwrap());
        // Should NOT overwrite
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"activeProvider\":\"secondary\"}"
        );
    }
}
