//! Derived views over fetched resources
//!
//! Pure computations the dashboard pages perform on top of the API
//! projections, plus the composite detail records.

pub mod detail;
pub mod enrichment;
pub mod membership;
pub mod placement_ref;
pub mod summary;

pub use detail::{ClusterDetail, ClusterSetDetail, PlacementDetail};
pub use enrichment::{AddonSummary, enrich_clusters_with_addons, merge_addon_summaries};
pub use membership::cluster_set_members;
pub use placement_ref::{
    PARSED_SENTINEL, PlacementRef, PlacementRefError, normalize_placement_params,
};
pub use summary::{ClusterSummary, binding_counts, placement_counts};
