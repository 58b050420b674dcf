//! ManagedClusterAddOn client
//!
//! Addons are addressed through their parent cluster.

use super::{FetchError, OcmClient, or_empty, or_none, require};
use crate::models::{ManagedClusterAddon, OcmResourceKind};

const KIND: OcmResourceKind = OcmResourceKind::ManagedClusterAddOn;
const CLUSTERS: &str = OcmResourceKind::ManagedCluster.collection();

impl OcmClient {
    /// GET /api/clusters/{cluster}/addons
    pub async fn try_fetch_cluster_addons(
        &self,
        cluster: &str,
    ) -> Result<Vec<ManagedClusterAddon>, FetchError> {
        require(KIND, &[("cluster", cluster)])?;
        self.get_list(&[CLUSTERS, cluster, KIND.collection()]).await
    }

    pub async fn fetch_cluster_addons(&self, cluster: &str) -> Vec<ManagedClusterAddon> {
        or_empty(KIND, self.try_fetch_cluster_addons(cluster).await)
    }

    /// GET /api/clusters/{cluster}/addons/{name}
    pub async fn try_fetch_cluster_addon(
        &self,
        cluster: &str,
        name: &str,
    ) -> Result<ManagedClusterAddon, FetchError> {
        require(KIND, &[("cluster", cluster), ("name", name)])?;
        self.get_item(&[CLUSTERS, cluster, KIND.collection(), name])
            .await
    }

    pub async fn fetch_cluster_addon(
        &self,
        cluster: &str,
        name: &str,
    ) -> Option<ManagedClusterAddon> {
        or_none(KIND, self.try_fetch_cluster_addon(cluster, name).await)
    }
}
