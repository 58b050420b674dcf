//! Placement and PlacementDecision clients

use super::{FetchError, OcmClient, or_empty, or_none, require};
use crate::models::{OcmResourceKind, Placement, PlacementDecision};
use crate::views::PlacementRef;

const PLACEMENTS: OcmResourceKind = OcmResourceKind::Placement;
const DECISIONS: OcmResourceKind = OcmResourceKind::PlacementDecision;

impl OcmClient {
    /// GET /api/placements
    pub async fn try_fetch_placements(&self) -> Result<Vec<Placement>, FetchError> {
        self.get_list(&[PLACEMENTS.collection()]).await
    }

    pub async fn fetch_placements(&self) -> Vec<Placement> {
        or_empty(PLACEMENTS, self.try_fetch_placements().await)
    }

    /// GET /api/namespaces/{namespace}/placements/{name}
    ///
    /// Accepts a `name` of the form `namespace/name` from callers that pass
    /// the raw route value.
    pub async fn try_fetch_placement_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Placement, FetchError> {
        let placement = PlacementRef::from_params(namespace, name);
        require(
            PLACEMENTS,
            &[("namespace", placement.namespace.as_str()), ("name", placement.name.as_str())],
        )?;
        self.get_item(&[
            "namespaces",
            placement.namespace.as_str(),
            PLACEMENTS.collection(),
            placement.name.as_str(),
        ])
        .await
    }

    pub async fn fetch_placement_by_name(&self, namespace: &str, name: &str) -> Option<Placement> {
        or_none(
            PLACEMENTS,
            self.try_fetch_placement_by_name(namespace, name).await,
        )
    }

    /// GET /api/namespaces/{namespace}/placements/{name}/placementdecisions
    pub async fn try_fetch_placement_decisions(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<PlacementDecision>, FetchError> {
        let placement = PlacementRef::from_params(namespace, name);
        require(
            DECISIONS,
            &[("namespace", placement.namespace.as_str()), ("name", placement.name.as_str())],
        )?;
        self.get_list(&[
            "namespaces",
            placement.namespace.as_str(),
            PLACEMENTS.collection(),
            placement.name.as_str(),
            DECISIONS.collection(),
        ])
        .await
    }

    pub async fn fetch_placement_decisions(
        &self,
        namespace: &str,
        name: &str,
    ) -> Vec<PlacementDecision> {
        or_empty(
            DECISIONS,
            self.try_fetch_placement_decisions(namespace, name).await,
        )
    }

    /// GET /api/placementdecisions
    pub async fn try_fetch_all_placement_decisions(
        &self,
    ) -> Result<Vec<PlacementDecision>, FetchError> {
        self.get_list(&[DECISIONS.collection()]).await
    }

    pub async fn fetch_all_placement_decisions(&self) -> Vec<PlacementDecision> {
        or_empty(DECISIONS, self.try_fetch_all_placement_decisions().await)
    }

    /// GET /api/namespaces/{namespace}/placementdecisions
    pub async fn try_fetch_placement_decisions_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Vec<PlacementDecision>, FetchError> {
        require(DECISIONS, &[("namespace", namespace)])?;
        self.get_list(&["namespaces", namespace, DECISIONS.collection()])
            .await
    }

    pub async fn fetch_placement_decisions_by_namespace(
        &self,
        namespace: &str,
    ) -> Vec<PlacementDecision> {
        or_empty(
            DECISIONS,
            self.try_fetch_placement_decisions_by_namespace(namespace)
                .await,
        )
    }

    /// GET /api/namespaces/{namespace}/placementdecisions/{name}
    pub async fn try_fetch_placement_decision_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PlacementDecision, FetchError> {
        require(DECISIONS, &[("namespace", namespace), ("name", name)])?;
        self.get_item(&["namespaces", namespace, DECISIONS.collection(), name])
            .await
    }

    pub async fn fetch_placement_decision_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<PlacementDecision> {
        or_none(
            DECISIONS,
            self.try_fetch_placement_decision_by_name(namespace, name)
                .await,
        )
    }
}
