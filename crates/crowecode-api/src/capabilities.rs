//! Public descriptors: the health report and the capability sheet.
//!
//! Both are fixed brand content. The only live data is whether a provider
//! is configured and the key-level registry report.

use serde::{Deserialize, Serialize};

use crowecode_providers::{ProviderRegistry, RegistryStatus};

pub const SERVICE_NAME: &str = "CroweCode™ Intelligence";
pub const SERVICE_VERSION: &str = "4.0";

pub const STATUS_OPERATIONAL: &str = "operational";
pub const STATUS_NOT_CONFIGURED: &str = "not_configured";

const HEALTH_FEATURES: &[&str] = &[
    "Code Generation",
    "Bug Detection",
    "Refactoring",
    "Documentation",
    "Multi-language Support",
];

const CAPABILITY_FEATURES: &[&str] = &[
    "256K context window",
    "Advanced reasoning",
    "Multi-step execution",
    "Code optimization",
    "Security analysis",
    "Pattern recognition",
];

/// Body of `GET /api/ai`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub service: String,
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
    pub configuration: RegistryReport,
}

/// Serializable mirror of [`RegistryStatus`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryReport {
    pub active: String,
    pub active_resolves: bool,
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
    pub ignored_switches: u64,
}

impl From<RegistryStatus> for RegistryReport {
    fn from(status: RegistryStatus) -> Self {
        RegistryReport {
            active: status.active,
            active_resolves: status.active_resolves,
            registered: status.registered,
            skipped: status.skipped,
            ignored_switches: status.ignored_switches,
        }
    }
}

impl HealthReport {
    pub fn from_registry(registry: &ProviderRegistry) -> Self {
        let status = if registry.has_any() {
            STATUS_OPERATIONAL
        } else {
            STATUS_NOT_CONFIGURED
        };
        HealthReport {
            service: SERVICE_NAME.to_string(),
            status: status.to_string(),
            version: SERVICE_VERSION.to_string(),
            features: HEALTH_FEATURES.iter().map(|f| f.to_string()).collect(),
            configuration: registry.status().into(),
        }
    }
}

/// Body of `GET /api/ai/capabilities`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Capabilities {
    pub name: String,
    pub version: String,
    pub features: Vec<String>,
    pub powered_by: String,
}

impl Capabilities {
    pub fn branded() -> Self {
        Capabilities {
            name: "CroweCode™ Intelligence System".to_string(),
            version: SERVICE_VERSION.to_string(),
            features: CAPABILITY_FEATURES.iter().map(|f| f.to_string()).collect(),
            powered_by: "Proprietary Neural Network".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowecode_core::config::{ProviderConfig, ProvidersConfig};

    #[test]
    fn test_health_not_configured() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default(), "primary");
        let report = HealthReport::from_registry(&registry);
        assert_eq!(report.status, "not_configured");
        assert_eq!(report.configuration.skipped.len(), 3);
        assert!(!report.configuration.active_resolves);
    }

    #[test]
    fn test_health_operational() {
        let config = ProvidersConfig {
            secondary: ProviderConfig::with_key("k"),
            ..Default::default()
        };
        let registry = ProviderRegistry::from_config(&config, "secondary");
        let report = HealthReport::from_registry(&registry);
        assert_eq!(report.status, "operational");
        assert_eq!(report.version, "4.0");
        assert_eq!(report.configuration.registered, vec!["secondary"]);
        assert!(report.features.contains(&"Refactoring".to_string()));
    }

    #[test]
    fn test_capabilities_shape() {
        let value = serde_json::to_value(Capabilities::branded()).unwrap();
        assert_eq!(value["name"], "CroweCode™ Intelligence System");
        assert_eq!(value["powered_by"], "Proprietary Neural Network");
        assert_eq!(value["features"].as_array().unwrap().len(), 6);
    }
}
