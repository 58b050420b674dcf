//! OCM model layer
//!
//! Read projections of the OCM custom resources served by the dashboard API.
//!
//! Structure:
//! - `condition.rs` - shared `Condition` type and derived-flag helpers
//! - `kind.rs` - resource kind enum (names, REST collections)
//! - one module per resource projection

pub mod addon;
pub mod cluster;
pub mod cluster_set;
pub mod condition;
pub mod kind;
pub mod manifest_work;
pub mod placement;

pub use addon::ManagedClusterAddon;
pub use cluster::{Cluster, ClusterClaim, ClusterStatus};
pub use cluster_set::{ClusterSet, ClusterSetBinding, SelectorType};
pub use condition::{Condition, Normalize, find_condition, is_condition_true};
pub use kind::OcmResourceKind;
pub use manifest_work::ManifestWork;
pub use placement::{ClusterDecision, Placement, PlacementDecision};

use serde::{Deserialize, Deserializer};

/// Deserialize a JSON `null` as the type's default
///
/// The backend emits `null` for empty maps and lists.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
