//! ManagedClusterSet and ManagedClusterSetBinding clients

use super::{FetchError, OcmClient, or_empty, or_none, require};
use crate::models::{ClusterSet, ClusterSetBinding, OcmResourceKind};

const SETS: OcmResourceKind = OcmResourceKind::ManagedClusterSet;
const BINDINGS: OcmResourceKind = OcmResourceKind::ManagedClusterSetBinding;
const NAMESPACES: &str = "namespaces";

impl OcmClient {
    /// GET /api/clustersets
    pub async fn try_fetch_cluster_sets(&self) -> Result<Vec<ClusterSet>, FetchError> {
        self.get_list(&[SETS.collection()]).await
    }

    pub async fn fetch_cluster_sets(&self) -> Vec<ClusterSet> {
        or_empty(SETS, self.try_fetch_cluster_sets().await)
    }

    /// GET /api/clustersets/{name}
    pub async fn try_fetch_cluster_set_by_name(
        &self,
        name: &str,
    ) -> Result<ClusterSet, FetchError> {
        require(SETS, &[("name", name)])?;
        self.get_item(&[SETS.collection(), name]).await
    }

    pub async fn fetch_cluster_set_by_name(&self, name: &str) -> Option<ClusterSet> {
        or_none(SETS, self.try_fetch_cluster_set_by_name(name).await)
    }

    /// GET /api/clustersetbindings
    pub async fn try_fetch_cluster_set_bindings(
        &self,
    ) -> Result<Vec<ClusterSetBinding>, FetchError> {
        self.get_list(&[BINDINGS.collection()]).await
    }

    pub async fn fetch_cluster_set_bindings(&self) -> Vec<ClusterSetBinding> {
        or_empty(BINDINGS, self.try_fetch_cluster_set_bindings().await)
    }

    /// GET /api/namespaces/{namespace}/clustersetbindings
    pub async fn try_fetch_cluster_set_bindings_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Vec<ClusterSetBinding>, FetchError> {
        require(BINDINGS, &[("namespace", namespace)])?;
        self.get_list(&[NAMESPACES, namespace, BINDINGS.collection()])
            .await
    }

    pub async fn fetch_cluster_set_bindings_by_namespace(
        &self,
        namespace: &str,
    ) -> Vec<ClusterSetBinding> {
        or_empty(
            BINDINGS,
            self.try_fetch_cluster_set_bindings_by_namespace(namespace)
                .await,
        )
    }

    /// GET /api/namespaces/{namespace}/clustersetbindings/{name}
    pub async fn try_fetch_cluster_set_binding_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ClusterSetBinding, FetchError> {
        require(BINDINGS, &[("namespace", namespace), ("name", name)])?;
        self.get_item(&[NAMESPACES, namespace, BINDINGS.collection(), name])
            .await
    }

    pub async fn fetch_cluster_set_binding_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<ClusterSetBinding> {
        or_none(
            BINDINGS,
            self.try_fetch_cluster_set_binding_by_name(namespace, name)
                .await,
        )
    }

    /// Bindings across all namespaces that reference `cluster_set`
    pub async fn try_fetch_cluster_set_bindings_for_set(
        &self,
        cluster_set: &str,
    ) -> Result<Vec<ClusterSetBinding>, FetchError> {
        let bindings = self.try_fetch_cluster_set_bindings().await?;
        Ok(bindings
            .into_iter()
            .filter(|b| b.spec.cluster_set == cluster_set)
            .collect())
    }

    pub async fn fetch_cluster_set_bindings_for_set(
        &self,
        cluster_set: &str,
    ) -> Vec<ClusterSetBinding> {
        or_empty(
            BINDINGS,
            self.try_fetch_cluster_set_bindings_for_set(cluster_set)
                .await,
        )
    }
}
