//! ManagedClusterSet and ManagedClusterSetBinding projections

use super::condition::{BINDING_BOUND, Condition, Normalize, is_condition_true};
use super::null_default;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label carried by clusters that belong to an exclusive cluster set
pub const CLUSTER_SET_LABEL: &str = "cluster.open-cluster-management.io/clusterset";

/// How a cluster set selects its members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorType {
    /// Members carry the cluster set label with the set's name
    #[default]
    ExclusiveClusterSetLabel,
    /// Members match a label selector; an empty selector selects every cluster
    LabelSelector,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSelector {
    #[serde(default, deserialize_with = "null_default")]
    pub selector_type: SelectorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSetSpec {
    #[serde(default, deserialize_with = "null_default")]
    pub cluster_selector: ClusterSelector,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatus {
    #[serde(default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,
}

/// Read projection of a ManagedClusterSet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSet {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_default")]
    pub spec: ClusterSetSpec,
    #[serde(default, deserialize_with = "null_default")]
    pub status: ResourceStatus,
}

impl ClusterSet {
    pub fn selector_type(&self) -> SelectorType {
        self.spec.cluster_selector.selector_type
    }
}

impl Normalize for ClusterSet {
    fn normalize(&mut self) {
        if self.id.is_empty() {
            self.id = self.name.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSetBindingSpec {
    #[serde(default, deserialize_with = "null_default")]
    pub cluster_set: String,
}

/// Read projection of a ManagedClusterSetBinding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSetBinding {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "null_default")]
    pub spec: ClusterSetBindingSpec,
    #[serde(default, deserialize_with = "null_default")]
    pub status: ResourceStatus,
    /// Derived from the Bound condition
    #[serde(default, deserialize_with = "null_default")]
    pub bound: bool,
}

impl Normalize for ClusterSetBinding {
    fn normalize(&mut self) {
        self.bound = is_condition_true(&self.status.conditions, BINDING_BOUND);
        if self.id.is_empty() {
            self.id = format!("{}/{}", self.namespace, self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selector_type_parsing() {
        let set: ClusterSet = serde_json::from_value(json!({
            "id": "global",
            "name": "global",
            "spec": {"clusterSelector": {"selectorType": "LabelSelector", "labelSelector": {}}}
        }))
        .unwrap();
        assert_eq!(set.selector_type(), SelectorType::LabelSelector);
        assert_eq!(
            set.spec.cluster_selector.label_selector,
            Some(LabelSelector::default())
        );

        let set: ClusterSet = serde_json::from_value(json!({"name": "default"})).unwrap();
        assert_eq!(set.selector_type(), SelectorType::ExclusiveClusterSetLabel);

        let set: ClusterSet = serde_json::from_value(json!({
            "name": "odd",
            "spec": {"clusterSelector": {"selectorType": "SomethingNew"}}
        }))
        .unwrap();
        assert_eq!(set.selector_type(), SelectorType::Unknown);
    }

    #[test]
    fn test_binding_bound_derivation() {
        let mut binding: ClusterSetBinding = serde_json::from_value(json!({
            "name": "default",
            "namespace": "app-team",
            "spec": {"clusterSet": "default"},
            "status": {"conditions": [{"type": "Bound", "status": "True"}]}
        }))
        .unwrap();
        binding.normalize();
        assert!(binding.bound);
        assert_eq!(binding.id, "app-team/default");
        assert_eq!(binding.spec.cluster_set, "default");

        binding.status.conditions[0].status = "False".to_string();
        binding.normalize();
        assert!(!binding.bound);
    }
}
