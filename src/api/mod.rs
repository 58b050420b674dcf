//! Dashboard API clients
//!
//! One module per OCM resource kind. Every operation comes in two forms:
//! - `try_*` returns a discriminated [`FetchError`] so callers can log, retry
//!   or surface distinct messages
//! - the plain form logs the failure and falls back to an empty list or `None`,
//!   so a bad fetch never takes a view down

mod addons;
mod auth_config;
mod cluster_sets;
mod clusters;
mod connect;
mod error;
mod manifest_works;
mod placements;
mod transport;

pub use connect::{Connection, connect};
pub use error::{FetchError, FetchErrorKind};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use crate::auth::HeaderBuilder;
use crate::models::{Normalize, OcmResourceKind};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Typed client for the dashboard backend
#[derive(Clone)]
pub struct OcmClient {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
    headers: HeaderBuilder,
}

impl OcmClient {
    pub fn new(base_url: Url, transport: Arc<dyn HttpTransport>, headers: HeaderBuilder) -> Self {
        Self {
            base_url,
            transport,
            headers,
        }
    }

    /// Client without credentials; requests carry only `Content-Type`
    pub fn anonymous(base_url: Url, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(base_url, transport, HeaderBuilder::anonymous())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderBuilder {
        &self.headers
    }

    /// Build `{base}/api/{segments...}` with each segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        api_url(&self.base_url, segments)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(segments)?;
        let headers = self.headers.headers().await;

        tracing::debug!("GET {}", url);

        let resp = self.transport.get(url.as_str(), &headers).await?;
        if !resp.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: resp.status,
            });
        }

        serde_json::from_str(&resp.body).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }

    pub(crate) async fn get_list<T>(&self, segments: &[&str]) -> Result<Vec<T>, FetchError>
    where
        T: DeserializeOwned + Normalize,
    {
        let mut items: Vec<T> = self.get_json(segments).await?;
        items.iter_mut().for_each(Normalize::normalize);
        Ok(items)
    }

    pub(crate) async fn get_item<T>(&self, segments: &[&str]) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Normalize,
    {
        let mut item: T = self.get_json(segments).await?;
        item.normalize();
        Ok(item)
    }
}

/// Build an API URL below `base`, keeping any path prefix the base carries
pub fn api_url(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidRequest {
            detail: format!("base URL cannot carry a path: {}", base),
        })?
        .pop_if_empty()
        .push("api")
        .extend(segments);
    Ok(url)
}

/// Reject composite keys with a missing part
pub(crate) fn require(kind: OcmResourceKind, ids: &[(&str, &str)]) -> Result<(), FetchError> {
    match ids.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(FetchError::InvalidRequest {
            detail: format!("{} {} is required", kind, field),
        }),
        None => Ok(()),
    }
}

/// Apply the list fallback policy: log and return an empty list
pub(crate) fn or_empty<T>(kind: OcmResourceKind, result: Result<Vec<T>, FetchError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to fetch {} list: {}", kind, e);
            Vec::new()
        }
    }
}

/// Apply the singular fallback policy: log and return `None`
pub(crate) fn or_none<T>(kind: OcmResourceKind, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", kind, e);
            None
        }
    }
}
