//! Output rendering for resource commands
//!
//! Tables are plain padded columns; YAML and JSON print the read projection.

use crate::config::OutputFormat;
use crate::models::{
    Cluster, ClusterSet, ClusterSetBinding, ManagedClusterAddon, ManifestWork, Placement,
    PlacementDecision,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

const EMPTY: &str = "-";

/// A record that can be shown as one table row
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self, now: DateTime<Utc>) -> Vec<String>;
}

/// Format elapsed time since `created` as `45s`, `12m`, `3h` or `5d`
pub fn format_age(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created) = created else {
        return EMPTY.to_string();
    };
    let duration = now.signed_duration_since(created);

    if duration.num_seconds() < 60 {
        format!("{}s", duration.num_seconds().max(0))
    } else if duration.num_minutes() < 60 {
        format!("{}m", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h", duration.num_hours())
    } else {
        format!("{}d", duration.num_days())
    }
}

fn yes_no(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        EMPTY.to_string()
    } else {
        value.to_string()
    }
}

/// Render rows as left-aligned columns separated by three spaces
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let last = cells.len().saturating_sub(1);
        let mut out = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}   ", cell, width = widths[i]));
            }
        }
        out.trim_end().to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to serialize output as YAML")
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .context("Failed to serialize output as JSON")
}

/// Render a list in the requested format
pub fn render_list<T: Serialize + TableRow>(
    items: &[T],
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<String> {
    match format {
        OutputFormat::Table if items.is_empty() => Ok("No resources found.\n".to_string()),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = items.iter().map(|item| item.row(now)).collect();
            Ok(render_table(T::headers(), &rows))
        }
        OutputFormat::Yaml => to_yaml(items),
        OutputFormat::Json => to_json(items),
    }
}

pub fn print_list<T: Serialize + TableRow>(items: &[T], format: OutputFormat) -> Result<()> {
    print!("{}", render_list(items, format, Utc::now())?);
    Ok(())
}

/// Print a detail record; `table` renders the human-readable form
pub fn print_detail<T: Serialize>(
    item: &T,
    format: OutputFormat,
    table: impl FnOnce(&T, DateTime<Utc>) -> String,
) -> Result<()> {
    let out = match format {
        OutputFormat::Table => table(item, Utc::now()),
        OutputFormat::Yaml => to_yaml(item)?,
        OutputFormat::Json => to_json(item)?,
    };
    print!("{}", out);
    Ok(())
}

impl TableRow for Cluster {
    fn headers() -> &'static [&'static str] {
        &["NAME", "STATUS", "VERSION", "ADDONS", "AGE"]
    }

    fn row(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.to_string(),
            self.version.as_deref().map_or_else(|| EMPTY.to_string(), or_dash),
            self.addon_count
                .map_or_else(|| EMPTY.to_string(), |count| count.to_string()),
            format_age(self.created_at(), now),
        ]
    }
}

impl TableRow for ClusterSet {
    fn headers() -> &'static [&'static str] {
        &["NAME", "SELECTOR"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![self.name.clone(), format!("{:?}", self.selector_type())]
    }
}

impl TableRow for ClusterSetBinding {
    fn headers() -> &'static [&'static str] {
        &["NAMESPACE", "NAME", "CLUSTERSET", "BOUND"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.name.clone(),
            or_dash(&self.spec.cluster_set),
            yes_no(self.bound),
        ]
    }
}

impl TableRow for Placement {
    fn headers() -> &'static [&'static str] {
        &["NAMESPACE", "NAME", "CLUSTERSETS", "SELECTED", "SUCCEEDED"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.name.clone(),
            or_dash(&self.cluster_sets.join(",")),
            self.number_of_selected_clusters.to_string(),
            yes_no(self.succeeded),
        ]
    }
}

impl TableRow for PlacementDecision {
    fn headers() -> &'static [&'static str] {
        &["NAMESPACE", "NAME", "CLUSTERS"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        let clusters: Vec<&str> = self.cluster_names().collect();
        vec![
            self.namespace.clone(),
            self.name.clone(),
            or_dash(&clusters.join(",")),
        ]
    }
}

impl TableRow for ManagedClusterAddon {
    fn headers() -> &'static [&'static str] {
        &["CLUSTER", "NAME", "INSTALL NAMESPACE", "AVAILABLE"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.name.clone(),
            or_dash(&self.install_namespace),
            yes_no(self.available()),
        ]
    }
}

impl TableRow for ManifestWork {
    fn headers() -> &'static [&'static str] {
        &["NAMESPACE", "NAME", "MANIFESTS", "APPLIED", "AVAILABLE"]
    }

    fn row(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.name.clone(),
            format!("{}/{}", self.applied_manifest_count(), self.manifests.len()),
            yes_no(self.applied()),
            yes_no(self.available()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClusterStatus;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_format_age() {
        let now = now();
        assert_eq!(format_age(None, now), "-");
        assert_eq!(format_age(Some(now - TimeDelta::seconds(45)), now), "45s");
        assert_eq!(format_age(Some(now - TimeDelta::minutes(12)), now), "12m");
        assert_eq!(format_age(Some(now - TimeDelta::hours(3)), now), "3h");
        assert_eq!(format_age(Some(now - TimeDelta::days(5)), now), "5d");
    }

    #[test]
    fn test_cluster_table() {
        let clusters = vec![
            Cluster {
                id: "hub-east".to_string(),
                name: "hub-east".to_string(),
                status: ClusterStatus::Online,
                version: Some("v1.31.2".to_string()),
                addon_count: Some(3),
                ..Default::default()
            },
            Cluster {
                id: "edge-1".to_string(),
                name: "edge-1".to_string(),
                ..Default::default()
            },
        ];

        let out = render_list(&clusters, OutputFormat::Table, now()).unwrap();
        insta::assert_snapshot!(out, @r"
        NAME       STATUS    VERSION   ADDONS   AGE
        hub-east   Online    v1.31.2   3        -
        edge-1     Offline   -         -        -
        ");
    }

    #[test]
    fn test_empty_table() {
        let out = render_list::<Placement>(&[], OutputFormat::Table, now()).unwrap();
        assert_eq!(out, "No resources found.\n");
    }

    #[test]
    fn test_json_output() {
        let binding = ClusterSetBinding {
            name: "global".to_string(),
            namespace: "default".to_string(),
            bound: true,
            ..Default::default()
        };
        let out = render_list(&[binding], OutputFormat::Json, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "global");
        assert_eq!(value[0]["bound"], true);
    }

    #[test]
    fn test_manifest_work_row_counts_applied_manifests() {
        let work: ManifestWork = serde_json::from_value(serde_json::json!({
            "name": "hello-work",
            "namespace": "cluster1",
            "manifests": [{"kind": "ConfigMap"}, {"kind": "Deployment"}],
            "conditions": [{"type": "Applied", "status": "True"}],
            "resourceStatus": {"manifests": [
                {"conditions": [{"type": "Applied", "status": "True"}]},
                {"conditions": [{"type": "Applied", "status": "False"}]}
            ]}
        }))
        .unwrap();

        assert_eq!(
            work.row(now()),
            vec!["cluster1", "hello-work", "1/2", "True", "False"]
        );
    }
}
