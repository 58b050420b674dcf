//! Addon enrichment for the cluster list
//!
//! Every cluster's addons are fetched concurrently and the results are
//! merged only once all fetches have settled, so the list is published in
//! a single update.

use crate::api::OcmClient;
use crate::models::{Cluster, ManagedClusterAddon};
use futures::future::join_all;

/// Addon count and names for one cluster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonSummary {
    pub count: usize,
    pub names: Vec<String>,
}

impl AddonSummary {
    pub fn from_addons(addons: &[ManagedClusterAddon]) -> Self {
        Self {
            count: addons.len(),
            names: addons.iter().map(|a| a.name.clone()).collect(),
        }
    }
}

/// Fetch addons for every cluster and return the enriched list
///
/// A failed fetch yields a zero-count placeholder for that cluster.
pub async fn enrich_clusters_with_addons(
    client: &OcmClient,
    clusters: Vec<Cluster>,
) -> Vec<Cluster> {
    let fetches = clusters.iter().map(|cluster| async move {
        match client.try_fetch_cluster_addons(&cluster.name).await {
            Ok(addons) => AddonSummary::from_addons(&addons),
            Err(e) => {
                tracing::warn!("Failed to fetch addons for cluster {}: {}", cluster.name, e);
                AddonSummary::default()
            }
        }
    });

    let summaries = join_all(fetches).await;
    merge_addon_summaries(clusters, summaries)
}

/// Attach summaries to clusters by position
pub fn merge_addon_summaries(clusters: Vec<Cluster>, summaries: Vec<AddonSummary>) -> Vec<Cluster> {
    clusters
        .into_iter()
        .zip(summaries.into_iter().chain(std::iter::repeat_with(AddonSummary::default)))
        .map(|(mut cluster, summary)| {
            cluster.addon_count = Some(summary.count);
            cluster.addon_names = summary.names;
            cluster
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(name: &str) -> Cluster {
        Cluster {
            id: name.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_keeps_order() {
        let merged = merge_addon_summaries(
            vec![cluster("a"), cluster("b")],
            vec![
                AddonSummary {
                    count: 2,
                    names: vec!["x".to_string(), "y".to_string()],
                },
                AddonSummary::default(),
            ],
        );

        assert_eq!(merged[0].name, "a");
        assert_eq!(merged[0].addon_count, Some(2));
        assert_eq!(merged[0].addon_names, vec!["x", "y"]);
        assert_eq!(merged[1].addon_count, Some(0));
    }

    #[test]
    fn test_merge_pads_missing_summaries() {
        let merged = merge_addon_summaries(vec![cluster("a")], Vec::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].addon_count, Some(0));
    }
}
