//! Kubernetes status conditions
//!
//! Every derived status flag in the dashboard is a pure function of a
//! resource's conditions: the flag is set iff a condition of the expected
//! type reports `status == "True"`.

use serde::{Deserialize, Serialize};

/// Condition type marking a ManagedCluster as reachable
pub const CLUSTER_AVAILABLE: &str = "ManagedClusterConditionAvailable";
/// Condition type marking a ManagedClusterSetBinding as bound
pub const BINDING_BOUND: &str = "Bound";
/// Condition type marking a Placement as satisfied
pub const PLACEMENT_SATISFIED: &str = "PlacementSatisfied";
/// Condition type reported by addons and manifest works
pub const AVAILABLE: &str = "Available";
/// Condition type reported by manifest works once applied
pub const APPLIED: &str = "Applied";

/// Standard Kubernetes status condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(type_: &str, status: &str) -> Self {
        Self {
            type_: type_.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == "True"
    }
}

/// Check whether a condition of `condition_type` with status `True` exists
pub fn is_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    conditions
        .iter()
        .any(|c| c.type_ == condition_type && c.is_true())
}

/// Find the first condition of the given type
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == condition_type)
}

/// Recomputes client-side derived fields after deserialization
///
/// Implementations must be idempotent: normalizing twice yields the same value.
pub trait Normalize {
    fn normalize(&mut self);
}
