//! ManagedCluster projection

use super::condition::{CLUSTER_AVAILABLE, Condition, Normalize, is_condition_true};
use super::null_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Reachability of a managed cluster, derived from its Available condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterStatus {
    Online,
    #[default]
    Offline,
}

impl ClusterStatus {
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        if is_condition_true(conditions, CLUSTER_AVAILABLE) {
            ClusterStatus::Online
        } else {
            ClusterStatus::Offline
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Online => "Online",
            ClusterStatus::Offline => "Offline",
        }
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A claim reported by the managed cluster's agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterClaim {
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub value: String,
}

/// Read projection of a ManagedCluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    #[serde(skip_deserializing)]
    pub status: ClusterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "null_default")]
    pub capacity: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub allocatable: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub cluster_claims: Vec<ClusterClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,
    /// Number of installed addons, filled in by addon enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_count: Option<usize>,
    #[serde(
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub addon_names: Vec<String>,
}

impl Cluster {
    pub fn is_online(&self) -> bool {
        self.status == ClusterStatus::Online
    }

    /// Value of a cluster claim, e.g. `platform.open-cluster-management.io`
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.cluster_claims
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.creation_timestamp
            .as_deref()
            .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&chrono::Utc))
    }
}

impl Normalize for Cluster {
    fn normalize(&mut self) {
        self.status = ClusterStatus::from_conditions(&self.conditions);
        if self.id.is_empty() {
            self.id = self.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_overrides_server_value() {
        let mut cluster: Cluster = serde_json::from_value(json!({
            "id": "c1",
            "name": "cluster1",
            "status": "Online",
            "conditions": [{"type": "ManagedClusterConditionAvailable", "status": "Unknown"}]
        }))
        .unwrap();
        cluster.normalize();
        assert_eq!(cluster.status, ClusterStatus::Offline);
    }

    #[test]
    fn test_minimal_payload() {
        let mut cluster: Cluster =
            serde_json::from_value(json!({"name": "local-cluster"})).unwrap();
        cluster.normalize();
        assert_eq!(cluster.id, "local-cluster");
        assert!(cluster.labels.is_empty());
        assert!(cluster.addon_count.is_none());
    }

    #[test]
    fn test_claims_and_timestamp() {
        let cluster: Cluster = serde_json::from_value(json!({
            "id": "c1",
            "name": "cluster1",
            "clusterClaims": [{"name": "platform.open-cluster-management.io", "value": "AWS"}],
            "creationTimestamp": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(cluster.claim("platform.open-cluster-management.io"), Some("AWS"));
        assert!(cluster.claim("region").is_none());
        assert_eq!(
            cluster.created_at().map(|t| t.to_rfc3339()),
            Some("2024-05-01T10:00:00+00:00".to_string())
        );
    }
}
