//! Status counts shown above resource lists

use crate::models::{Cluster, ClusterSetBinding, Placement};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClusterSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
}

impl ClusterSummary {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let online = clusters.iter().filter(|c| c.is_online()).count();
        Self {
            total: clusters.len(),
            online,
            offline: clusters.len() - online,
        }
    }
}

/// `(succeeded, total)` placements
pub fn placement_counts(placements: &[Placement]) -> (usize, usize) {
    let succeeded = placements.iter().filter(|p| p.succeeded).count();
    (succeeded, placements.len())
}

/// `(bound, total)` bindings
pub fn binding_counts(bindings: &[ClusterSetBinding]) -> (usize, usize) {
    let bound = bindings.iter().filter(|b| b.bound).count();
    (bound, bindings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClusterStatus;

    #[test]
    fn test_cluster_summary() {
        let clusters = vec![
            Cluster {
                name: "a".to_string(),
                status: ClusterStatus::Online,
                ..Default::default()
            },
            Cluster {
                name: "b".to_string(),
                ..Default::default()
            },
        ];

        let summary = ClusterSummary::from_clusters(&clusters);
        assert_eq!(
            summary,
            ClusterSummary {
                total: 2,
                online: 1,
                offline: 1
            }
        );
        assert_eq!(ClusterSummary::from_clusters(&[]), ClusterSummary::default());
    }

    #[test]
    fn test_placement_and_binding_counts() {
        let placements = vec![
            Placement {
                name: "p1".to_string(),
                succeeded: true,
                ..Default::default()
            },
            Placement {
                name: "p2".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(placement_counts(&placements), (1, 2));
        assert_eq!(binding_counts(&[]), (0, 0));
    }
}
