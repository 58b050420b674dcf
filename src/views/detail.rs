//! Composite projections for the detail commands

use crate::models::{
    Cluster, ClusterSet, ClusterSetBinding, ManagedClusterAddon, ManifestWork, Placement,
    PlacementDecision,
};
use serde::Serialize;

/// A cluster with the addons and manifest works in its namespace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetail {
    pub cluster: Cluster,
    pub addons: Vec<ManagedClusterAddon>,
    pub manifest_works: Vec<ManifestWork>,
}

/// A cluster set with its computed members and the bindings that reference it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSetDetail {
    pub cluster_set: ClusterSet,
    pub members: Vec<Cluster>,
    pub bindings: Vec<ClusterSetBinding>,
}

/// A placement with its decisions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDetail {
    pub placement: Placement,
    pub decisions: Vec<PlacementDecision>,
}

impl PlacementDetail {
    /// Clusters selected across every decision, in decision order
    pub fn selected_clusters(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .flat_map(|decision| decision.cluster_names())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClusterDecision;

    #[test]
    fn test_selected_clusters() {
        let decision = |names: &[&str]| PlacementDecision {
            name: "d".to_string(),
            namespace: "ns".to_string(),
            decisions: names
                .iter()
                .map(|n| ClusterDecision {
                    cluster_name: n.to_string(),
                    reason: String::new(),
                })
                .collect(),
        };

        let detail = PlacementDetail {
            placement: Placement::default(),
            decisions: vec![decision(&["c1", "c2"]), decision(&["c3"])],
        };
        assert_eq!(detail.selected_clusters(), vec!["c1", "c2", "c3"]);
    }
}
