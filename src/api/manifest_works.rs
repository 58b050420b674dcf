//! ManifestWork client

use super::{FetchError, OcmClient, or_empty, or_none, require};
use crate::models::{ManifestWork, OcmResourceKind};

const KIND: OcmResourceKind = OcmResourceKind::ManifestWork;

impl OcmClient {
    /// GET /api/namespaces/{namespace}/manifestworks
    pub async fn try_fetch_manifest_works(
        &self,
        namespace: &str,
    ) -> Result<Vec<ManifestWork>, FetchError> {
        require(KIND, &[("namespace", namespace)])?;
        self.get_list(&["namespaces", namespace, KIND.collection()])
            .await
    }

    pub async fn fetch_manifest_works(&self, namespace: &str) -> Vec<ManifestWork> {
        or_empty(KIND, self.try_fetch_manifest_works(namespace).await)
    }

    /// GET /api/namespaces/{namespace}/manifestworks/{name}
    pub async fn try_fetch_manifest_work_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ManifestWork, FetchError> {
        require(KIND, &[("namespace", namespace), ("name", name)])?;
        self.get_item(&["namespaces", namespace, KIND.collection(), name])
            .await
    }

    pub async fn fetch_manifest_work_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<ManifestWork> {
        or_none(KIND, self.try_fetch_manifest_work_by_name(namespace, name).await)
    }
}
