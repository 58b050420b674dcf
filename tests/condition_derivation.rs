//! Derived field tests
//!
//! Cluster status, binding `bound` and placement `succeeded` are recomputed
//! from conditions after decoding, whatever the server sent.

mod common;

use common::condition;
use ocmdash::models::{Cluster, ClusterSetBinding, ClusterStatus, Normalize, Placement};
use serde_json::json;

fn decode<T: serde::de::DeserializeOwned + Normalize>(value: serde_json::Value) -> T {
    let mut item: T = serde_json::from_value(value).unwrap();
    item.normalize();
    item
}

#[test]
fn test_cluster_status_truth_table() {
    let cases = [
        (vec![condition("ManagedClusterConditionAvailable", "True")], ClusterStatus::Online),
        (vec![condition("ManagedClusterConditionAvailable", "False")], ClusterStatus::Offline),
        (vec![condition("ManagedClusterConditionAvailable", "Unknown")], ClusterStatus::Offline),
        (vec![condition("ManagedClusterJoined", "True")], ClusterStatus::Offline),
        (vec![], ClusterStatus::Offline),
        (
            vec![
                condition("ManagedClusterJoined", "True"),
                condition("ManagedClusterConditionAvailable", "True"),
            ],
            ClusterStatus::Online,
        ),
    ];

    for (conditions, expected) in cases {
        let cluster: Cluster = decode(json!({
            "name": "c1",
            "conditions": conditions.clone(),
        }));
        assert_eq!(cluster.status, expected, "conditions: {:?}", conditions);
    }
}

#[test]
fn test_server_status_is_overridden() {
    let cluster: Cluster = decode(json!({
        "name": "c1",
        "status": "Online",
        "conditions": [condition("ManagedClusterConditionAvailable", "False")],
    }));
    assert_eq!(cluster.status, ClusterStatus::Offline);
    assert_eq!(cluster.id, "c1");
}

#[test]
fn test_binding_bound() {
    let bound: ClusterSetBinding = decode(json!({
        "name": "global",
        "namespace": "default",
        "spec": {"clusterSet": "global"},
        "status": {"conditions": [condition("Bound", "True")]},
    }));
    assert!(bound.bound);
    assert_eq!(bound.id, "default/global");

    let unbound: ClusterSetBinding = decode(json!({
        "name": "global",
        "namespace": "default",
        "bound": true,
        "status": {"conditions": [condition("Bound", "False")]},
    }));
    assert!(!unbound.bound);
}

#[test]
fn test_placement_succeeded() {
    let placement: Placement = decode(json!({
        "name": "p1",
        "namespace": "default",
        "conditions": [condition("PlacementSatisfied", "True")],
    }));
    assert!(placement.succeeded);

    let placement: Placement = decode(json!({
        "name": "p1",
        "namespace": "default",
        "succeeded": true,
        "conditions": [],
    }));
    assert!(!placement.succeeded);
}

#[test]
fn test_normalize_is_idempotent() {
    let mut cluster: Cluster = decode(json!({
        "name": "c1",
        "conditions": [condition("ManagedClusterConditionAvailable", "True")],
    }));
    let once = cluster.clone();
    cluster.normalize();
    assert_eq!(cluster, once);

    let mut placement: Placement = decode(json!({
        "name": "p1",
        "namespace": "ns",
        "conditions": [condition("PlacementSatisfied", "True")],
    }));
    let once = placement.clone();
    placement.normalize();
    assert_eq!(placement, once);
}
