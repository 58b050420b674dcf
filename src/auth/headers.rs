//! Header injection for dashboard API requests

use super::session::{AuthSession, AuthState};
use super::store::MemoryTokenStore;
use super::token_cache::TokenCache;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Builds the header set attached to every request
///
/// In OIDC mode the ID token comes from the session's token cache, falling
/// back to an OIDC session lookup on a miss. In bearer mode the stored token
/// is sent verbatim. No refresh is attempted on 401.
#[derive(Clone)]
pub struct HeaderBuilder {
    session: Arc<AuthSession>,
}

impl HeaderBuilder {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    /// Builder for a session that can never authenticate
    pub fn anonymous() -> Self {
        Self::new(Arc::new(AuthSession::new(
            Arc::new(MemoryTokenStore::new()),
            None,
            Arc::new(TokenCache::default()),
        )))
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    /// Value of the `Authorization` header, if any
    pub async fn authorization(&self) -> Option<String> {
        match self.session.state() {
            AuthState::Oidc => self
                .session
                .id_token()
                .await
                .map(|token| format!("Bearer {}", token)),
            AuthState::Bearer => self.session.bearer_token(),
            AuthState::Unauthenticated => None,
        }
    }

    pub async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(authorization) = self.authorization().await {
            match HeaderValue::from_str(&authorization) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => tracing::warn!("Skipping unusable Authorization header: {}", e),
            }
        }

        headers
    }
}
