//! ManifestWork projection

use super::condition::{APPLIED, AVAILABLE, Condition, Normalize, is_condition_true};
use super::null_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies one manifest inside a work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    #[serde(default, deserialize_with = "null_default")]
    pub ordinal: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub group: String,
    #[serde(default, deserialize_with = "null_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_default")]
    pub resource: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub namespace: String,
}

/// Applied state of a single manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCondition {
    #[serde(default, deserialize_with = "null_default")]
    pub resource_meta: ResourceMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,
}

impl ManifestCondition {
    pub fn applied(&self) -> bool {
        is_condition_true(&self.conditions, APPLIED)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestResourceStatus {
    #[serde(default, deserialize_with = "null_default")]
    pub manifests: Vec<ManifestCondition>,
}

/// Read projection of a ManifestWork
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestWork {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub namespace: String,
    /// Raw resource payloads dispatched to the cluster
    #[serde(default, deserialize_with = "null_default")]
    pub manifests: Vec<Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "null_default")]
    pub resource_status: ManifestResourceStatus,
}

impl ManifestWork {
    pub fn applied(&self) -> bool {
        is_condition_true(&self.conditions, APPLIED)
    }

    pub fn available(&self) -> bool {
        is_condition_true(&self.conditions, AVAILABLE)
    }

    /// Number of manifests reporting an Applied condition
    pub fn applied_manifest_count(&self) -> usize {
        self.resource_status
            .manifests
            .iter()
            .filter(|m| m.applied())
            .count()
    }
}

impl Normalize for ManifestWork {
    fn normalize(&mut self) {
        if self.id.is_empty() {
            self.id = format!("{}/{}", self.namespace, self.name);
        }
    }
}
