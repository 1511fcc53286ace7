//! Config loader — reads `~/.crowecode/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.crowecode/config.json`
//! 3. Vendor secrets (`XAI_API_KEY`, `ANTHROPIC_API_KEY`, `OPENAI_API_KEY`)
//! 4. Environment variables `CROWECODE_<SECTION>__<FIELD>`

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Vendor secret variable for each registry key.
pub const VENDOR_SECRET_VARS: &[(&str, &str)] = &[
    ("primary", "XAI_API_KEY"),
    ("fallback", "ANTHROPIC_API_KEY"),
    ("secondary", "OPENAI_API_KEY"),
];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config)
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides from the process environment.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides using an arbitrary variable lookup.
///
/// Supported variables:
/// - `XAI_API_KEY` / `ANTHROPIC_API_KEY` / `OPENAI_API_KEY` → `providers.<key>.api_key`
/// - `CROWECODE_PROVIDERS__<KEY>__API_KEY` → `providers.<key>.api_key`
/// - `CROWECODE_PROVIDERS__<KEY>__API_BASE` → `providers.<key>.api_base`
/// - `CROWECODE_PROVIDERS__<KEY>__MODEL` → `providers.<key>.model`
/// - `CROWECODE_ACTIVE_PROVIDER` → `active_provider`
/// - `CROWECODE_SERVER__HOST` / `CROWECODE_SERVER__PORT` → `server.*`
/// - `CROWECODE_SERVER__ADMIN_TOKEN` → `server.admin_token`
///
/// Empty values are ignored so that `XAI_API_KEY=` does not count as a key.
pub fn apply_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    for &(key, secret_var) in VENDOR_SECRET_VARS {
        if let Some(provider) = config.providers.get_by_name_mut(key) {
            if let Some(val) = var(secret_var) {
                provider.api_key = val;
            }
            apply_provider_env(provider, &key.to_uppercase(), &var);
        }
    }

    if let Some(val) = var("CROWECODE_ACTIVE_PROVIDER") {
        config.active_provider = val;
    }

    if let Some(val) = var("CROWECODE_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(val) = var("CROWECODE_SERVER__PORT") {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("Ignoring invalid CROWECODE_SERVER__PORT={}", val),
        }
    }
    if let Some(val) = var("CROWECODE_SERVER__ADMIN_TOKEN") {
        config.server.admin_token = val;
    }

    config
}

/// Apply `CROWECODE_PROVIDERS__<NAME>__*` overrides for a single provider.
fn apply_provider_env<F>(provider: &mut ProviderConfig, name: &str, var: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var(&format!("CROWECODE_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = var(&format!("CROWECODE_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Some(val) = var(&format!("CROWECODE_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
