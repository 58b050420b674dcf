//! Cluster list addon enrichment and cluster-set membership through the
//! async resource bindings

mod common;

use common::{addon_json, client, cluster_json, routes};
use ocmdash::api::HttpResponse;
use ocmdash::hooks::{use_cluster_set, use_clusters_with_addons};
use serde_json::json;

#[tokio::test]
async fn test_enrichment_publishes_once_with_counts() {
    let client = client(routes(vec![
        (
            "/api/clusters",
            HttpResponse::json(&json!([cluster_json("c1", true), cluster_json("c2", true)])),
        ),
        (
            "/api/clusters/c1/addons",
            HttpResponse::json(&json!([
                addon_json("c1", "application-manager"),
                addon_json("c1", "work-manager"),
            ])),
        ),
        ("/api/clusters/c2/addons", HttpResponse::json(&json!([]))),
    ]));

    let resource = use_clusters_with_addons(&client);
    let snapshot = resource.settled().await;

    assert_eq!(snapshot.updates, 1);
    assert!(snapshot.error.is_none());
    let clusters = snapshot.data.unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].addon_count, Some(2));
    assert_eq!(
        clusters[0].addon_names,
        vec!["application-manager", "work-manager"]
    );
    assert_eq!(clusters[1].addon_count, Some(0));
}

#[tokio::test]
async fn test_failed_addon_fetch_is_zero_placeholder() {
    let client = client(routes(vec![
        (
            "/api/clusters",
            HttpResponse::json(&json!([cluster_json("c1", true), cluster_json("c2", false)])),
        ),
        (
            "/api/clusters/c1/addons",
            HttpResponse::json(&json!([addon_json("c1", "work-manager")])),
        ),
        ("/api/clusters/c2/addons", HttpResponse::new(503, "unavailable")),
    ]));

    let snapshot = use_clusters_with_addons(&client).settled().await;
    let clusters = snapshot.data.unwrap();
    assert_eq!(clusters[0].addon_count, Some(1));
    assert_eq!(clusters[1].addon_count, Some(0));
    assert!(clusters[1].addon_names.is_empty());
}

#[tokio::test]
async fn test_cluster_list_failure_is_reported() {
    let client = client(routes(vec![(
        "/api/clusters",
        HttpResponse::new(500, "boom"),
    )]));

    let snapshot = use_clusters_with_addons(&client).settled().await;
    assert!(snapshot.data.is_none());
    assert_eq!(snapshot.error.unwrap().status(), Some(500));
}

#[tokio::test]
async fn test_cluster_set_with_empty_selector_selects_all() {
    let client = client(routes(vec![
        (
            "/api/clustersets/global",
            HttpResponse::json(&json!({
                "name": "global",
                "spec": {
                    "clusterSelector": {
                        "selectorType": "LabelSelector",
                        "labelSelector": {},
                    },
                },
            })),
        ),
        (
            "/api/clusters",
            HttpResponse::json(&json!([cluster_json("c1", true), cluster_json("c2", false)])),
        ),
        (
            "/api/clustersetbindings",
            HttpResponse::json(&json!([
                {"name": "global", "namespace": "default", "spec": {"clusterSet": "global"}},
                {"name": "east", "namespace": "default", "spec": {"clusterSet": "east"}},
            ])),
        ),
    ]));

    let detail = use_cluster_set(&client, "global")
        .load()
        .await
        .unwrap()
        .flatten()
        .unwrap();

    let members: Vec<&str> = detail.members.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(members, vec!["c1", "c2"]);
    assert_eq!(detail.bindings.len(), 1);
    assert_eq!(detail.bindings[0].spec.cluster_set, "global");
}

#[tokio::test]
async fn test_missing_cluster_set_is_none() {
    let client = client(routes(vec![]));
    let detail = use_cluster_set(&client, "nope").load().await.unwrap();
    assert_eq!(detail, Some(None));
}
