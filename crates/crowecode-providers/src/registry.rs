//! Provider registry — the vendor table, the configured providers, and the
//! active selection.
//!
//! Keys are brand-neutral (`primary`, `fallback`, `secondary`). Vendor
//! identity only lives in the endpoint and model of each entry and never
//! leaves the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info, warn};

use crowecode_core::config::{ProviderConfig, ProvidersConfig};

// ─────────────────────────────────────────────
// VendorSpec — static metadata for one slot
// ─────────────────────────────────────────────

/// Static description of one provider slot.
#[derive(Clone, Debug)]
pub struct VendorSpec {
    /// Registry key (e.g. `"primary"`).
    pub key: &'static str,
    /// Brand-neutral display name.
    pub display_name: &'static str,
    /// Default chat-completions URL.
    pub endpoint: &'static str,
    /// Default model identifier.
    pub model: &'static str,
    /// Environment variable holding the credential.
    pub env_key: &'static str,
}

/// Every slot the registry knows how to populate, in registration order.
pub static VENDORS: &[VendorSpec] = &[
    VendorSpec {
        key: "primary",
        display_name: "CroweCode Neural Engine",
        endpoint: "https://api.x.ai/v1/chat/completions",
        model: "grok-4-latest",
        env_key: "XAI_API_KEY",
    },
    // This slot speaks the chat-completions envelope with bearer auth, which
    // the endpoint below does not accept; requests routed here fail with 503
    // until `apiBase` points at a compatible gateway.
    VendorSpec {
        key: "fallback",
        display_name: "CroweCode Backup Engine",
        endpoint: "https://api.anthropic.com/v1/messages",
        model: "claude-3-opus-20240229",
        env_key: "ANTHROPIC_API_KEY",
    },
    VendorSpec {
        key: "secondary",
        display_name: "CroweCode Alternative Engine",
        endpoint: "https://api.openai.com/v1/chat/completions",
        model: "gpt-4-turbo-preview",
        env_key: "OPENAI_API_KEY",
    },
];

/// Find a vendor spec by registry key.
pub fn find_by_key(key: &str) -> Option<&'static VendorSpec> {
    VENDORS.iter().find(|spec| spec.key == key)
}

/// Name shown to users wherever the assistant is referred to.
pub const DISPLAY_NAME: &str = "CroweCode™ Intelligence";

/// Model description shown to users.
pub const MODEL_INFO: &str = "CroweCode Neural Architecture v4.0";

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// One configured upstream provider. Immutable once built.
#[derive(Clone, PartialEq)]
pub struct Provider {
    pub key: String,
    pub display_name: String,
    pub endpoint: String,
    pub model: String,
    credential: String,
}

impl Provider {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Provider {
            key: key.into(),
            display_name: display_name.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            credential: credential.into(),
        }
    }

    /// Build from a vendor spec, letting the user config override endpoint
    /// and model.
    pub fn from_spec(spec: &VendorSpec, config: &ProviderConfig) -> Self {
        Provider::new(
            spec.key,
            spec.display_name,
            config.api_base.as_deref().unwrap_or(spec.endpoint),
            config.model.as_deref().unwrap_or(spec.model),
            config.api_key.as_str(),
        )
    }

    /// The secret sent as Bearer token. Only the HTTP backend should read this.
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────
// Status report
// ─────────────────────────────────────────────

/// Snapshot of how the registry was populated and used.
///
/// Registration and switching never fail loudly; this is where operators
/// look to detect a misconfiguration. Contains keys only.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct RegistryStatus {
    /// Key currently selected (may not resolve, see `active_resolves`).
    pub active: String,
    /// Whether `active` names a registered provider.
    pub active_resolves: bool,
    /// Registered keys, sorted.
    pub registered: Vec<String>,
    /// Keys skipped at startup because no credential was configured.
    pub skipped: Vec<String>,
    /// Number of switch requests naming an unknown key.
    pub ignored_switches: u64,
}

// ─────────────────────────────────────────────
// ProviderRegistry
// ─────────────────────────────────────────────

/// Registered providers plus the active selection.
///
/// Registration takes `&mut self` and happens before the registry is shared.
/// After that it lives behind an `Arc` and only the active key changes,
/// guarded by an `RwLock`. Readers get an `Arc<Provider>` snapshot, so a
/// request keeps using the provider it resolved even if a switch lands
/// mid-flight.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<Provider>>,
    active: RwLock<String>,
    skipped: Vec<String>,
    ignored_switches: AtomicU64,
}

impl ProviderRegistry {
    /// Create an empty registry whose selection points at `active_key`.
    pub fn new(active_key: impl Into<String>) -> Self {
        ProviderRegistry {
            providers: HashMap::new(),
            active: RwLock::new(active_key.into()),
            skipped: Vec::new(),
            ignored_switches: AtomicU64::new(0),
        }
    }

    /// Populate from configuration: one entry per vendor slot that has a
    /// credential. Slots without one are skipped and recorded.
    pub fn from_config(providers: &ProvidersConfig, active_key: &str) -> Self {
        let mut registry = ProviderRegistry::new(active_key);
        for spec in VENDORS {
            match providers.get_by_name(spec.key) {
                Some(config) => {
                    registry.register_from_config(spec, config);
                }
                None => registry.mark_skipped(spec.key),
            }
        }

        if registry.get_active().is_none() {
            warn!(
                active = active_key,
                registered = registry.len(),
                "active provider does not resolve"
            );
        }
        registry
    }

    /// Register a slot if its config carries a credential.
    ///
    /// Returns `false` (and records the key as skipped) otherwise.
    pub fn register_from_config(&mut self, spec: &VendorSpec, config: &ProviderConfig) -> bool {
        if !config.is_configured() {
            debug!(provider = spec.key, env = spec.env_key, "no credential, skipping");
            self.mark_skipped(spec.key);
            return false;
        }
        self.register(Provider::from_spec(spec, config));
        true
    }

    /// Insert or replace the provider under its key.
    pub fn register(&mut self, provider: Provider) {
        info!(provider = %provider.key, model = %provider.model, "registered provider");
        self.skipped.retain(|k| k != &provider.key);
        self.providers
            .insert(provider.key.clone(), Arc::new(provider));
    }

    fn mark_skipped(&mut self, key: &str) {
        if !self.skipped.iter().any(|k| k == key) {
            self.skipped.push(key.to_string());
        }
    }

    /// Look up a provider by key.
    pub fn get(&self, key: &str) -> Option<Arc<Provider>> {
        self.providers.get(key).cloned()
    }

    /// The provider bound to the active key, if any.
    pub fn get_active(&self) -> Option<Arc<Provider>> {
        let active = self.read_active();
        self.providers.get(active.as_str()).cloned()
    }

    /// The active key, whether or not it resolves.
    pub fn active_key(&self) -> String {
        self.read_active().clone()
    }

    /// Point the selection at `key` if it is registered.
    ///
    /// Unknown keys leave the selection unchanged; the attempt is logged and
    /// counted in [`RegistryStatus::ignored_switches`]. Returns whether the
    /// switch happened.
    pub fn switch_active(&self, key: &str) -> bool {
        if !self.providers.contains_key(key) {
            self.ignored_switches.fetch_add(1, Ordering::Relaxed);
            warn!(provider = key, "switch to unknown provider ignored");
            return false;
        }

        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *active != key {
            info!(from = %active, to = key, "switched active provider");
            *active = key.to_string();
        }
        true
    }

    /// Whether at least one provider is registered.
    pub fn has_any(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registered keys, sorted for determinism.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.providers.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Brand display name, independent of the active vendor.
    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    /// Brand model description, independent of the active vendor.
    pub fn model_info(&self) -> &'static str {
        MODEL_INFO
    }

    /// Configuration report for health checks and the `status` command.
    pub fn status(&self) -> RegistryStatus {
        let active = self.active_key();
        RegistryStatus {
            active_resolves: self.providers.contains_key(&active),
            active,
            registered: self.keys(),
            skipped: self.skipped.clone(),
            ignored_switches: self.ignored_switches.load(Ordering::Relaxed),
        }
    }

    fn read_active(&self) -> std::sync::RwLockReadGuard<'_, String> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("active", &self.active_key())
            .field("providers", &self.keys())
            .finish()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_slot_can_be_pointed_at_compatible_gateway() {
        let spec = find_by_key("fallback").unwrap();
        assert_eq!(spec.endpoint, "https://api.anthropic.com/v1/messages");

        let config = ProviderConfig {
            api_key: "k".to_string(),
            api_base: Some("https://gateway.internal/v1/chat/completions".to_string()),
            model: None,
        };
        let provider = Provider::from_spec(spec, &config);
        assert_eq!(provider.endpoint, "https://gateway.internal/v1/chat/completions");
        assert_eq!(provider.model, spec.model);
    }

    fn provider(key: &str) -> Provider {
        Provider::new(
            key,
            "CroweCode Test Engine",
            "http://localhost/v1/chat/completions",
            "test-model",
            "secret-credential",
        )
    }

    fn providers_config(primary: &str, fallback: &str, secondary: &str) -> ProvidersConfig {
        ProvidersConfig {
            primary: ProviderConfig::with_key(primary),
            fallback: ProviderConfig::with_key(fallback),
            secondary: ProviderConfig::with_key(secondary),
        }
    }

    #[test]
    fn test_vendor_keys_unique() {
        let mut keys: Vec<&str> = VENDORS.iter().map(|s| s.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), VENDORS.len());
    }

    #[test]
    fn test_display_names_are_brand_neutral() {
        for spec in VENDORS {
            assert!(spec.display_name.starts_with("CroweCode"), "{}", spec.key);
        }
    }

    #[test]
    fn test_find_by_key() {
        assert_eq!(find_by_key("secondary").unwrap().env_key, "OPENAI_API_KEY");
        assert!(find_by_key("tertiary").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default(), "primary");
        assert!(!registry.has_any());
        assert!(registry.get_active().is_none());
        let status = registry.status();
        assert!(!status.active_resolves);
        assert_eq!(status.skipped, vec!["primary", "fallback", "secondary"]);
    }

    #[test]
    fn test_from_config_skips_missing_credentials() {
        let registry = ProviderRegistry::from_config(&providers_config("xai", "", "oa"), "primary");
        assert_eq!(registry.keys(), vec!["primary", "secondary"]);
        assert_eq!(registry.status().skipped, vec!["fallback"]);
        let active = registry.get_active().unwrap();
        assert_eq!(active.model, "grok-4-latest");
        assert_eq!(active.credential(), "xai");
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let mut config = providers_config("", "", "oa");
        config.secondary.api_base = Some("http://127.0.0.1:8080/v1/chat/completions".to_string());
        config.secondary.model = Some("gpt-4o".to_string());
        let registry = ProviderRegistry::from_config(&config, "secondary");
        let active = registry.get_active().unwrap();
        assert_eq!(active.endpoint, "http://127.0.0.1:8080/v1/chat/completions");
        assert_eq!(active.model, "gpt-4o");
        assert_eq!(active.display_name, "CroweCode Alternative Engine");
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ProviderRegistry::new("primary");
        registry.register(provider("primary"));
        registry.register(provider("primary"));
        assert_eq!(registry.len(), 1);
        assert_eq!(*registry.get("primary").unwrap(), provider("primary"));
    }

    #[test]
    fn test_register_clears_skipped() {
        let mut registry = ProviderRegistry::from_config(&ProvidersConfig::default(), "primary");
        registry.register(provider("primary"));
        assert_eq!(registry.status().skipped, vec!["fallback", "secondary"]);
        assert!(registry.status().active_resolves);
    }

    #[test]
    fn test_switch_to_registered_key() {
        let registry = ProviderRegistry::from_config(&providers_config("a", "b", "c"), "primary");
        assert!(registry.switch_active("fallback"));
        assert_eq!(registry.get_active().unwrap().key, "fallback");
        assert_eq!(registry.active_key(), "fallback");
    }

    #[test]
    fn test_switch_to_unknown_key_is_noop() {
        let registry = ProviderRegistry::from_config(&providers_config("a", "", ""), "primary");
        assert!(!registry.switch_active("fallback"));
        assert!(!registry.switch_active("nonexistent"));
        assert_eq!(registry.get_active().unwrap().key, "primary");
        assert_eq!(registry.status().ignored_switches, 2);
    }

    #[test]
    fn test_active_may_not_resolve() {
        let registry = ProviderRegistry::from_config(&providers_config("", "", "c"), "primary");
        assert!(registry.has_any());
        assert!(registry.get_active().is_none());
        assert_eq!(registry.active_key(), "primary");
    }

    #[test]
    fn test_snapshot_survives_switch() {
        let registry = ProviderRegistry::from_config(&providers_config("a", "b", ""), "primary");
        let in_flight = registry.get_active().unwrap();
        registry.switch_active("fallback");
        assert_eq!(in_flight.key, "primary");
        assert_eq!(registry.get_active().unwrap().key, "fallback");
    }

    #[test]
    fn test_concurrent_switches_always_resolve() {
        let registry = Arc::new(ProviderRegistry::from_config(
            &providers_config("a", "b", "c"),
            "primary",
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for j in 0..200 {
                        let key = VENDORS[(i + j) % VENDORS.len()].key;
                        registry.switch_active(key);
                        assert!(registry.get_active().is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(registry.status().active_resolves);
    }

    #[test]
    fn test_debug_hides_credential() {
        let rendered = format!("{:?}", provider("primary"));
        assert!(!rendered.contains("secret-credential"));
        assert!(rendered.contains("test-model"));
    }

    #[test]
    fn test_brand_strings() {
        let registry = ProviderRegistry::new("primary");
        assert_eq!(registry.display_name(), "CroweCode™ Intelligence");
        assert_eq!(registry.model_info(), "CroweCode Neural Architecture v4.0");
    }
}
