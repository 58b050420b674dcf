//! Per-resource bindings
//!
//! Singular resources resolve a 404 to `None` so "not found" and "failed"
//! stay distinct. An empty identifier resolves to `None` without a request.

use super::AsyncResource;
use crate::api::{FetchError, OcmClient};
use crate::models::{Cluster, ManagedClusterAddon, ManifestWork};
use crate::views::{
    ClusterDetail, ClusterSetDetail, PlacementDetail, PlacementRef, cluster_set_members,
    enrich_clusters_with_addons,
};

fn missing_as_none<T>(result: Result<T, FetchError>) -> Result<Option<T>, FetchError> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn use_clusters(client: &OcmClient) -> AsyncResource<Vec<Cluster>> {
    let client = client.clone();
    AsyncResource::new(move || {
        let client = client.clone();
        async move { client.try_fetch_clusters().await }
    })
}

/// Cluster list with addon counts
///
/// The list is published once, after every cluster's addon fetch settled.
pub fn use_clusters_with_addons(client: &OcmClient) -> AsyncResource<Vec<Cluster>> {
    let client = client.clone();
    AsyncResource::new(move || {
        let client = client.clone();
        async move {
            let clusters = client.try_fetch_clusters().await?;
            Ok(enrich_clusters_with_addons(&client, clusters).await)
        }
    })
}

pub fn use_cluster(client: &OcmClient, name: &str) -> AsyncResource<Option<Cluster>> {
    let client = client.clone();
    let name = name.to_string();
    AsyncResource::new(move || {
        let client = client.clone();
        let name = name.clone();
        async move {
            if name.is_empty() {
                return Ok(None);
            }
            missing_as_none(client.try_fetch_cluster_by_name(&name).await)
        }
    })
}

/// Cluster with its addons and manifest works, fetched concurrently
pub fn use_cluster_detail(
    client: &OcmClient,
    name: &str,
) -> AsyncResource<Option<ClusterDetail>> {
    let client = client.clone();
    let name = name.to_string();
    AsyncResource::new(move || {
        let client = client.clone();
        let name = name.clone();
        async move {
            if name.is_empty() {
                return Ok(None);
            }
            let (cluster, addons, manifest_works) = futures::join!(
                client.try_fetch_cluster_by_name(&name),
                client.try_fetch_cluster_addons(&name),
                client.try_fetch_manifest_works(&name),
            );
            let Some(cluster) = missing_as_none(cluster)? else {
                return Ok(None);
            };
            Ok(Some(ClusterDetail {
                cluster,
                addons: addons?,
                manifest_works: manifest_works?,
            }))
        }
    })
}

pub fn use_cluster_addons(
    client: &OcmClient,
    cluster: &str,
) -> AsyncResource<Vec<ManagedClusterAddon>> {
    let client = client.clone();
    let cluster = cluster.to_string();
    AsyncResource::new(move || {
        let client = client.clone();
        let cluster = cluster.clone();
        async move {
            if cluster.is_empty() {
                return Ok(Vec::new());
            }
            client.try_fetch_cluster_addons(&cluster).await
        }
    })
}

/// Manifest works delivered to a cluster (they live in the cluster's namespace)
pub fn use_cluster_manifest_works(
    client: &OcmClient,
    cluster: &str,
) -> AsyncResource<Vec<ManifestWork>> {
    let client = client.clone();
    let cluster = cluster.to_string();
    AsyncResource::new(move || {
        let client = client.clone();
        let cluster = cluster.clone();
        async move {
            if cluster.is_empty() {
                return Ok(Vec::new());
            }
            client.try_fetch_manifest_works(&cluster).await
        }
    })
}

/// Cluster set with computed members and the bindings that reference it
pub fn use_cluster_set(
    client: &OcmClient,
    name: &str,
) -> AsyncResource<Option<ClusterSetDetail>> {
    let client = client.clone();
    let name = name.to_string();
    AsyncResource::new(move || {
        let client = client.clone();
        let name = name.clone();
        async move {
            if name.is_empty() {
                return Ok(None);
            }
            let found = client.try_fetch_cluster_set_by_name(&name).await;
            let Some(cluster_set) = missing_as_none(found)? else {
                return Ok(None);
            };
            let (clusters, bindings) = futures::join!(
                client.try_fetch_clusters(),
                client.try_fetch_cluster_set_bindings_for_set(&name),
            );
            let members = cluster_set_members(&cluster_set, &clusters?);
            Ok(Some(ClusterSetDetail {
                cluster_set,
                members,
                bindings: bindings?,
            }))
        }
    })
}

/// Placement with its decisions
pub fn use_placement(
    client: &OcmClient,
    placement: &PlacementRef,
) -> AsyncResource<Option<PlacementDetail>> {
    let client = client.clone();
    let placement = placement.clone();
    AsyncResource::new(move || {
        let client = client.clone();
        let PlacementRef { namespace, name } = placement.clone();
        async move {
            let (found, decisions) = futures::join!(
                client.try_fetch_placement_by_name(&namespace, &name),
                client.try_fetch_placement_decisions(&namespace, &name),
            );
            let Some(placement) = missing_as_none(found)? else {
                return Ok(None);
            };
            Ok(Some(PlacementDetail {
                placement,
                decisions: decisions?,
            }))
        }
    })
}
