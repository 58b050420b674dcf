//! ManagedClusterAddOn projection

use super::condition::{AVAILABLE, Condition, Normalize, is_condition_true};
use super::null_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSubject {
    #[serde(default, deserialize_with = "null_default")]
    pub user: String,
    #[serde(default, deserialize_with = "null_default")]
    pub groups: Vec<String>,
}

/// Client certificate registration requested by an addon agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default, deserialize_with = "null_default")]
    pub signer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<RegistrationSubject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Configuration type an addon accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedConfig {
    #[serde(default, deserialize_with = "null_default")]
    pub group: String,
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_config: Option<ConfigReference>,
}

/// Read projection of a ManagedClusterAddOn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterAddon {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    /// Cluster namespace on the hub
    #[serde(default, deserialize_with = "null_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "null_default")]
    pub install_namespace: String,
    #[serde(default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "null_default")]
    pub registrations: Vec<Registration>,
    #[serde(default, deserialize_with = "null_default")]
    pub supported_configs: Vec<SupportedConfig>,
}

impl ManagedClusterAddon {
    pub fn available(&self) -> bool {
        is_condition_true(&self.conditions, AVAILABLE)
    }
}

impl Normalize for ManagedClusterAddon {
    fn normalize(&mut self) {
        if self.id.is_empty() {
            self.id = format!("{}/{}", self.namespace, self.name);
        }
    }
}
