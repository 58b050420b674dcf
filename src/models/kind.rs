//! OCM resource kind definitions
//!
//! Centralized enum for every OCM resource kind the dashboard reads.
//! Keeps kind names and REST collection names in one place.

use std::fmt;

/// Enumeration of all OCM resource kinds served by the dashboard API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcmResourceKind {
    // Cluster inventory
    ManagedCluster,
    ManagedClusterSet,
    ManagedClusterSetBinding,
    // Scheduling
    Placement,
    PlacementDecision,
    // Addon framework
    ManagedClusterAddOn,
    // Work distribution
    ManifestWork,
}

impl OcmResourceKind {
    /// Get the kind name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            OcmResourceKind::ManagedCluster => "ManagedCluster",
            OcmResourceKind::ManagedClusterSet => "ManagedClusterSet",
            OcmResourceKind::ManagedClusterSetBinding => "ManagedClusterSetBinding",
            OcmResourceKind::Placement => "Placement",
            OcmResourceKind::PlacementDecision => "PlacementDecision",
            OcmResourceKind::ManagedClusterAddOn => "ManagedClusterAddOn",
            OcmResourceKind::ManifestWork => "ManifestWork",
        }
    }

    /// Collection segment used by the dashboard REST API
    pub const fn collection(&self) -> &'static str {
        match self {
            OcmResourceKind::ManagedCluster => "clusters",
            OcmResourceKind::ManagedClusterSet => "clustersets",
            OcmResourceKind::ManagedClusterSetBinding => "clustersetbindings",
            OcmResourceKind::Placement => "placements",
            OcmResourceKind::PlacementDecision => "placementdecisions",
            OcmResourceKind::ManagedClusterAddOn => "addons",
            OcmResourceKind::ManifestWork => "manifestworks",
        }
    }
}

impl fmt::Display for OcmResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(OcmResourceKind::ManagedCluster.as_str(), "ManagedCluster");
        assert_eq!(OcmResourceKind::ManifestWork.as_str(), "ManifestWork");
    }

    #[test]
    fn test_display_and_collection() {
        assert_eq!(OcmResourceKind::Placement.to_string(), "Placement");
        assert_eq!(OcmResourceKind::ManagedClusterAddOn.collection(), "addons");
    }
}
