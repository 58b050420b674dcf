//! Resource client failure policy
//!
//! Plain operations turn every failure into an empty list or `None`;
//! `try_*` operations report what went wrong.

mod common;

use common::{MockTransport, always, client, cluster_json, routes, url};
use ocmdash::api::HttpResponse;
use ocmdash::{FetchError, FetchErrorKind};
use serde_json::json;

#[tokio::test]
async fn test_http_500_falls_back_to_empty() {
    let client = client(always(500));

    assert!(client.fetch_clusters().await.is_empty());
    assert!(client.fetch_cluster_by_name("c1").await.is_none());
    assert!(client.fetch_cluster_addons("c1").await.is_empty());
    assert!(client.fetch_cluster_addon("c1", "a1").await.is_none());
    assert!(client.fetch_cluster_sets().await.is_empty());
    assert!(client.fetch_cluster_set_by_name("global").await.is_none());
    assert!(client.fetch_cluster_set_bindings().await.is_empty());
    assert!(client.fetch_cluster_set_bindings_by_namespace("default").await.is_empty());
    assert!(client.fetch_cluster_set_binding_by_name("default", "global").await.is_none());
    assert!(client.fetch_cluster_set_bindings_for_set("global").await.is_empty());
    assert!(client.fetch_placements().await.is_empty());
    assert!(client.fetch_placement_by_name("default", "p1").await.is_none());
    assert!(client.fetch_placement_decisions("default", "p1").await.is_empty());
    assert!(client.fetch_all_placement_decisions().await.is_empty());
    assert!(client.fetch_placement_decisions_by_namespace("default").await.is_empty());
    assert!(client.fetch_placement_decision_by_name("default", "d1").await.is_none());
    assert!(client.fetch_manifest_works("c1").await.is_empty());
    assert!(client.fetch_manifest_work_by_name("c1", "w1").await.is_none());
}

#[tokio::test]
async fn test_try_reports_http_status() {
    let client = client(always(500));

    let err = client.try_fetch_clusters().await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Http);
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err,
        FetchError::Http {
            url: url("/api/clusters"),
            status: 500,
        }
    );
}

#[tokio::test]
async fn test_not_found_is_none() {
    let client = client(routes(vec![]));

    assert!(client.fetch_cluster_by_name("missing").await.is_none());
    let err = client.try_fetch_cluster_by_name("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_network_error() {
    let mut transport = MockTransport::new();
    transport.expect_get().returning(|url, _| {
        Err(FetchError::Network {
            url: url.to_string(),
            detail: "connection refused".to_string(),
        })
    });
    let client = client(transport);

    assert!(client.fetch_placements().await.is_empty());
    let err = client.try_fetch_placements().await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let client = client(routes(vec![
        ("/api/clusters", HttpResponse::new(200, "<html>login</html>")),
        ("/api/clustersets", HttpResponse::json(&json!({"items": []}))),
    ]));

    assert!(client.fetch_clusters().await.is_empty());
    assert_eq!(
        client.try_fetch_clusters().await.unwrap_err().kind(),
        FetchErrorKind::Parse
    );
    assert_eq!(
        client.try_fetch_cluster_sets().await.unwrap_err().kind(),
        FetchErrorKind::Parse
    );
}

#[tokio::test]
async fn test_missing_identifier_is_request_error() {
    let client = client(MockTransport::new());

    let err = client.try_fetch_placement_by_name("", "p1").await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Request);
    assert!(client.fetch_manifest_work_by_name("c1", "").await.is_none());
}

#[tokio::test]
async fn test_success_decodes_and_derives() {
    let client = client(routes(vec![
        (
            "/api/clusters",
            HttpResponse::json(&json!([cluster_json("c1", true), cluster_json("c2", false)])),
        ),
        ("/api/clusters/c1", HttpResponse::json(&cluster_json("c1", true))),
    ]));

    let clusters = client.fetch_clusters().await;
    assert_eq!(clusters.len(), 2);
    assert!(clusters[0].is_online());
    assert!(!clusters[1].is_online());

    let cluster = client.fetch_cluster_by_name("c1").await.unwrap();
    assert_eq!(cluster.name, "c1");
}

#[tokio::test]
async fn test_null_fields_and_server_status_do_not_fail_list() {
    let client = client(routes(vec![(
        "/api/clusters",
        HttpResponse::json(&json!([
            {
                "name": "c1",
                "status": "Unknown",
                "labels": null,
                "conditions": null,
                "capacity": null,
                "allocatable": null,
                "clusterClaims": null,
            },
            cluster_json("c2", true),
        ])),
    )]));

    let clusters = client.try_fetch_clusters().await.unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].id, "c1");
    assert!(!clusters[0].is_online());
    assert!(clusters[0].labels.is_empty());
    assert!(clusters[1].is_online());
}

#[tokio::test]
async fn test_paths_and_headers() {
    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(|url, headers| {
            url == "http://hub.test/api/namespaces/cluster%201/manifestworks"
                && headers.get("content-type").is_some_and(|v| v == "application/json")
                && headers.get("authorization").is_none()
        })
        .times(1)
        .returning(|_, _| Ok(HttpResponse::new(200, "[]")));
    let client = client(transport);

    assert!(client.try_fetch_manifest_works("cluster 1").await.unwrap().is_empty());
}
