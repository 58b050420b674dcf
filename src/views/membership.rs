//! Cluster-set membership, computed client-side from the cluster collection

use crate::models::cluster_set::CLUSTER_SET_LABEL;
use crate::models::{Cluster, ClusterSet, SelectorType};
use kube::core::{Selector, SelectorExt};

/// Clusters that belong to `set`
///
/// - `ExclusiveClusterSetLabel`: clusters labelled with the set's name
/// - `LabelSelector`: clusters matching the selector; a missing or empty
///   selector selects every cluster
///
/// An unparsable selector or unknown selector type selects nothing.
pub fn cluster_set_members(set: &ClusterSet, clusters: &[Cluster]) -> Vec<Cluster> {
    match set.selector_type() {
        SelectorType::ExclusiveClusterSetLabel => clusters
            .iter()
            .filter(|c| c.labels.get(CLUSTER_SET_LABEL) == Some(&set.name))
            .cloned()
            .collect(),
        SelectorType::LabelSelector => {
            let Some(label_selector) = &set.spec.cluster_selector.label_selector else {
                return clusters.to_vec();
            };
            let selector = match Selector::try_from(label_selector.clone()) {
                Ok(selector) => selector,
                Err(e) => {
                    tracing::warn!("Cluster set {} has an invalid selector: {}", set.name, e);
                    return Vec::new();
                }
            };
            clusters
                .iter()
                .filter(|c| selector.matches(&c.labels))
                .cloned()
                .collect()
        }
        SelectorType::Unknown => {
            tracing::debug!("Cluster set {} has an unknown selector type", set.name);
            Vec::new()
        }
    }
}
