//! Resource listing and detail commands

use super::output::{TableRow, format_age, print_detail, print_list, render_table};
use crate::api::OcmClient;
use crate::config::OutputFormat;
use crate::hooks::{
    AsyncResource, use_cluster_addons, use_cluster_detail, use_cluster_manifest_works,
    use_cluster_set, use_clusters, use_clusters_with_addons, use_placement,
};
use crate::models::condition::CLUSTER_AVAILABLE;
use crate::models::{
    Cluster, ClusterSetBinding, ManagedClusterAddon, ManifestWork, OcmResourceKind, find_condition,
};
use crate::views::{
    ClusterDetail, ClusterSetDetail, ClusterSummary, PlacementDetail, PlacementRef,
    binding_counts, placement_counts,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Wait for a resource and turn its failure into a command error
async fn settle<T>(resource: AsyncResource<T>, what: &str) -> Result<Option<T>>
where
    T: Clone + Send + Sync + 'static,
{
    resource
        .load()
        .await
        .with_context(|| format!("Failed to fetch {}", what))
}

fn not_found(kind: OcmResourceKind, name: &str) -> anyhow::Error {
    anyhow::anyhow!("{} '{}' not found", kind, name)
}

pub async fn clusters(
    client: &OcmClient,
    name: Option<String>,
    addons: bool,
    format: OutputFormat,
) -> Result<()> {
    if let Some(name) = name {
        let detail = settle(use_cluster_detail(client, &name), "cluster")
            .await?
            .flatten()
            .ok_or_else(|| not_found(OcmResourceKind::ManagedCluster, &name))?;
        return print_detail(&detail, format, cluster_detail_table);
    }

    let resource = if addons {
        use_clusters_with_addons(client)
    } else {
        use_clusters(client)
    };
    let clusters = settle(resource, "clusters").await?.unwrap_or_default();
    print_list(&clusters, format)?;

    if format == OutputFormat::Table && !clusters.is_empty() {
        let summary = ClusterSummary::from_clusters(&clusters);
        println!(
            "\n{} clusters: {} online, {} offline",
            summary.total, summary.online, summary.offline
        );
    }
    Ok(())
}

pub async fn cluster_sets(
    client: &OcmClient,
    name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(name) = name {
        let detail = settle(use_cluster_set(client, &name), "cluster set")
            .await?
            .flatten()
            .ok_or_else(|| not_found(OcmResourceKind::ManagedClusterSet, &name))?;
        return print_detail(&detail, format, cluster_set_detail_table);
    }

    let sets = client
        .try_fetch_cluster_sets()
        .await
        .context("Failed to fetch cluster sets")?;
    print_list(&sets, format)
}

pub async fn bindings(
    client: &OcmClient,
    namespace: Option<String>,
    name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let bindings = match (namespace, name) {
        (Some(namespace), Some(name)) => vec![
            client
                .try_fetch_cluster_set_binding_by_name(&namespace, &name)
                .await
                .with_context(|| format!("Failed to fetch binding {}/{}", namespace, name))?,
        ],
        (Some(namespace), None) => client
            .try_fetch_cluster_set_bindings_by_namespace(&namespace)
            .await
            .context("Failed to fetch cluster set bindings")?,
        (None, Some(name)) => anyhow::bail!("--namespace is required to show binding '{}'", name),
        (None, None) => client
            .try_fetch_cluster_set_bindings()
            .await
            .context("Failed to fetch cluster set bindings")?,
    };

    print_list(&bindings, format)?;
    if format == OutputFormat::Table && bindings.len() > 1 {
        let (bound, total) = binding_counts(&bindings);
        println!("\n{}/{} bound", bound, total);
    }
    Ok(())
}

pub async fn placements(
    client: &OcmClient,
    placement: Option<String>,
    namespace: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(route) = placement {
        let placement = PlacementRef::resolve(&route, namespace.as_deref())?;
        let detail = settle(use_placement(client, &placement), "placement")
            .await?
            .flatten()
            .ok_or_else(|| not_found(OcmResourceKind::Placement, &placement.to_string()))?;
        return print_detail(&detail, format, placement_detail_table);
    }

    let mut placements = client
        .try_fetch_placements()
        .await
        .context("Failed to fetch placements")?;
    if let Some(namespace) = namespace {
        placements.retain(|p| p.namespace == namespace);
    }

    print_list(&placements, format)?;
    if format == OutputFormat::Table && !placements.is_empty() {
        let (succeeded, total) = placement_counts(&placements);
        println!("\n{}/{} succeeded", succeeded, total);
    }
    Ok(())
}

pub async fn decisions(
    client: &OcmClient,
    namespace: Option<String>,
    name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let decisions = match (namespace, name) {
        (Some(namespace), Some(name)) => vec![
            client
                .try_fetch_placement_decision_by_name(&namespace, &name)
                .await
                .with_context(|| format!("Failed to fetch decision {}/{}", namespace, name))?,
        ],
        (Some(namespace), None) => client
            .try_fetch_placement_decisions_by_namespace(&namespace)
            .await
            .context("Failed to fetch placement decisions")?,
        (None, Some(name)) => {
            anyhow::bail!("--namespace is required to show decision '{}'", name)
        }
        (None, None) => client
            .try_fetch_all_placement_decisions()
            .await
            .context("Failed to fetch placement decisions")?,
    };
    print_list(&decisions, format)
}

pub async fn addons(
    client: &OcmClient,
    cluster: &str,
    name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let addons: Vec<ManagedClusterAddon> = match name {
        Some(name) => vec![
            client
                .try_fetch_cluster_addon(cluster, &name)
                .await
                .with_context(|| format!("Failed to fetch addon {} on {}", name, cluster))?,
        ],
        None => settle(use_cluster_addons(client, cluster), "addons")
            .await?
            .unwrap_or_default(),
    };
    print_list(&addons, format)
}

pub async fn works(
    client: &OcmClient,
    namespace: &str,
    name: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let works: Vec<ManifestWork> = match name {
        Some(name) => vec![
            client
                .try_fetch_manifest_work_by_name(namespace, &name)
                .await
                .with_context(|| format!("Failed to fetch manifest work {}/{}", namespace, name))?,
        ],
        None => settle(use_cluster_manifest_works(client, namespace), "manifest works")
            .await?
            .unwrap_or_default(),
    };
    print_list(&works, format)
}

fn section<T: TableRow>(out: &mut String, title: &str, items: &[T], now: DateTime<Utc>) {
    let _ = writeln!(out, "\n{}:", title);
    if items.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    let rows: Vec<Vec<String>> = items.iter().map(|item| item.row(now)).collect();
    for line in render_table(T::headers(), &rows).lines() {
        let _ = writeln!(out, "  {}", line);
    }
}

fn labels(out: &mut String, labels: &std::collections::BTreeMap<String, String>) {
    if labels.is_empty() {
        return;
    }
    out.push_str("Labels:\n");
    for (key, value) in labels {
        let _ = writeln!(out, "  {}={}", key, value);
    }
}

fn cluster_detail_table(detail: &ClusterDetail, now: DateTime<Utc>) -> String {
    let cluster: &Cluster = &detail.cluster;
    let mut out = String::new();
    let _ = writeln!(out, "Name:     {}", cluster.name);
    let _ = writeln!(out, "Status:   {}", cluster.status);
    if let Some(reason) = find_condition(&cluster.conditions, CLUSTER_AVAILABLE)
        .and_then(|condition| condition.reason.as_deref())
    {
        let _ = writeln!(out, "Reason:   {}", reason);
    }
    let _ = writeln!(out, "Version:  {}", cluster.version.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Age:      {}", format_age(cluster.created_at(), now));
    labels(&mut out, &cluster.labels);
    if !cluster.cluster_claims.is_empty() {
        out.push_str("Claims:\n");
        for claim in &cluster.cluster_claims {
            let _ = writeln!(out, "  {}={}", claim.name, claim.value);
        }
    }
    section(&mut out, "Addons", &detail.addons, now);
    section(&mut out, "Manifest works", &detail.manifest_works, now);
    out
}

fn cluster_set_detail_table(detail: &ClusterSetDetail, now: DateTime<Utc>) -> String {
    let set = &detail.cluster_set;
    let mut out = String::new();
    let _ = writeln!(out, "Name:      {}", set.name);
    let _ = writeln!(out, "Selector:  {:?}", set.selector_type());
    labels(&mut out, &set.labels);
    section(&mut out, "Members", &detail.members, now);
    section::<ClusterSetBinding>(&mut out, "Bindings", &detail.bindings, now);
    out
}

fn placement_detail_table(detail: &PlacementDetail, now: DateTime<Utc>) -> String {
    let placement = &detail.placement;
    let mut out = String::new();
    let _ = writeln!(out, "Name:       {}/{}", placement.namespace, placement.name);
    let _ = writeln!(out, "Succeeded:  {}", placement.succeeded);
    let _ = writeln!(
        out,
        "Clusters:   {} selected{}",
        placement.number_of_selected_clusters,
        placement
            .number_of_clusters
            .map(|n| format!(" of {} requested", n))
            .unwrap_or_default()
    );
    if !placement.cluster_sets.is_empty() {
        let _ = writeln!(out, "Sets:       {}", placement.cluster_sets.join(", "));
    }
    section(&mut out, "Decisions", &detail.decisions, now);

    let selected = detail.selected_clusters();
    if !selected.is_empty() {
        let _ = writeln!(out, "\nSelected clusters: {}", selected.join(", "));
    }
    out
}
