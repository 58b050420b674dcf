//! ManagedCluster client

use super::{FetchError, OcmClient, or_empty, or_none, require};
use crate::models::{Cluster, OcmResourceKind};

const KIND: OcmResourceKind = OcmResourceKind::ManagedCluster;

impl OcmClient {
    /// GET /api/clusters
    pub async fn try_fetch_clusters(&self) -> Result<Vec<Cluster>, FetchError> {
        self.get_list(&[KIND.collection()]).await
    }

    pub async fn fetch_clusters(&self) -> Vec<Cluster> {
        or_empty(KIND, self.try_fetch_clusters().await)
    }

    /// GET /api/clusters/{name}
    pub async fn try_fetch_cluster_by_name(&self, name: &str) -> Result<Cluster, FetchError> {
        require(KIND, &[("name", name)])?;
        self.get_item(&[KIND.collection(), name]).await
    }

    pub async fn fetch_cluster_by_name(&self, name: &str) -> Option<Cluster> {
        or_none(KIND, self.try_fetch_cluster_by_name(name).await)
    }
}
