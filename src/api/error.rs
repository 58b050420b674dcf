//! Discriminated fetch errors

use thiserror::Error;

/// Broad category of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Request,
    Network,
    Http,
    Parse,
}

/// Failure of a single dashboard API request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request could not be built (missing identifier, unusable base URL)
    #[error("invalid request: {detail}")]
    InvalidRequest { detail: String },

    /// The request never completed
    #[error("request to {url} failed: {detail}")]
    Network { url: String, detail: String },

    /// The server answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// The body was not the expected JSON shape
    #[error("failed to decode response from {url}: {detail}")]
    Parse { url: String, detail: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidRequest { .. } => FetchErrorKind::Request,
            FetchError::Network { .. } => FetchErrorKind::Network,
            FetchError::Http { .. } => FetchErrorKind::Http,
            FetchError::Parse { .. } => FetchErrorKind::Parse,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
