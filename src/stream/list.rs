//! Local cluster collection patched by stream events

use super::ClusterEvent;
use crate::models::Cluster;

/// Ordered cluster list reconciled from stream events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterList {
    clusters: Vec<Cluster>,
}

impl ClusterList {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    /// Apply one event; returns whether the list changed
    ///
    /// - `Added` appends, or replaces an entry with the same id
    /// - `Modified` replaces the matching entry in place; unknown ids are ignored
    /// - `Deleted` removes the matching entry
    ///
    /// Addon counts computed for an entry survive a replacement.
    pub fn apply(&mut self, event: ClusterEvent) -> bool {
        match event {
            ClusterEvent::Added(cluster) => {
                if !self.replace(cluster.clone()) {
                    self.clusters.push(cluster);
                }
                true
            }
            ClusterEvent::Modified(cluster) => self.replace(cluster),
            ClusterEvent::Deleted { id } => {
                let before = self.clusters.len();
                self.clusters.retain(|c| c.id != id);
                self.clusters.len() != before
            }
            ClusterEvent::Error(_) => false,
        }
    }

    fn replace(&mut self, mut cluster: Cluster) -> bool {
        match self.clusters.iter_mut().find(|c| c.id == cluster.id) {
            Some(existing) => {
                if cluster.addon_count.is_none() {
                    cluster.addon_count = existing.addon_count;
                    cluster.addon_names = std::mem::take(&mut existing.addon_names);
                }
                *existing = cluster;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn into_inner(self) -> Vec<Cluster> {
        self.clusters
    }
}
