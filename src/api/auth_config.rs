//! Authentication configuration endpoint

use super::{FetchError, OcmClient};
use crate::auth::AuthConfig;

impl OcmClient {
    /// GET /api/auth/config
    pub async fn try_fetch_auth_config(&self) -> Result<AuthConfig, FetchError> {
        self.get_json(&["auth", "config"]).await
    }

    /// Auth configuration, or OIDC disabled when the hub does not answer
    pub async fn fetch_auth_config(&self) -> AuthConfig {
        match self.try_fetch_auth_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to fetch auth config, assuming OIDC disabled: {}", e);
                AuthConfig::default()
            }
        }
    }
}
