//! OIDC sign-in
//!
//! Authorization-code flow against the identity provider advertised by the
//! hub's `/api/auth/config`. The signed-in user is persisted in the token
//! store so later invocations pick the session up again.

use super::store::{OIDC_STATE_KEY, OIDC_USER_KEY, TokenStore};
use super::token_cache::Clock;
use super::AuthError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_SCOPE: &str = "openid profile email";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/auth/callback";

/// Response of `GET /api/auth/config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(default, alias = "oidcEnabled")]
    pub enabled: bool,
    #[serde(default, alias = "authority", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AuthConfig {
    /// Usable OIDC settings, or None when OIDC is disabled or incomplete
    pub fn oidc_settings(&self) -> Option<OidcSettings> {
        if !self.enabled {
            return None;
        }

        let issuer = self.issuer.as_deref().filter(|s| !s.is_empty())?;
        let client_id = self.client_id.clone().filter(|s| !s.is_empty())?;
        let authority = match Url::parse(issuer) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Ignoring OIDC config with invalid issuer {}: {}", issuer, e);
                return None;
            }
        };

        Some(OidcSettings {
            authority,
            client_id,
            redirect_uri: self
                .redirect_uri
                .clone()
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: self
                .scope
                .clone()
                .unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OidcSettings {
    pub authority: Url,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

/// Signed-in OIDC user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcUser {
    pub id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl OidcUser {
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expires_at.or_else(|| id_token_expiry(&self.id_token))
    }

    /// A user without any known expiry never expires locally
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry().is_some_and(|expiry| expiry <= now)
    }
}

/// `exp` claim of a JWT, without verifying the signature
pub fn id_token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

/// OIDC session operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OidcProvider: Send + Sync {
    /// Stored user, expired or not
    async fn get_user(&self) -> Option<OidcUser>;

    /// Start a sign-in; returns the provider URL the user must visit
    async fn sign_in_redirect(&self) -> Result<Url, AuthError>;

    /// Exchange the authorization code from the callback for tokens
    async fn sign_in_callback(&self, code: &str, state: &str) -> Result<OidcUser, AuthError>;

    async fn remove_user(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Deserialize)]
struct ProviderMetadata {
    authorization_endpoint: String,
    token_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// OIDC provider backed by the identity provider's discovery document
pub struct OidcClient {
    settings: OidcSettings,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    timeout: Option<Duration>,
}

impl OidcClient {
    pub fn new(
        settings: OidcSettings,
        http: reqwest::Client,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            http,
            store,
            clock,
            timeout: None,
        }
    }

    /// Bound every provider request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn bounded(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    pub fn settings(&self) -> &OidcSettings {
        &self.settings
    }

    fn discovery_url(&self) -> Result<Url, AuthError> {
        let mut url = self.settings.authority.clone();
        url.path_segments_mut()
            .map_err(|_| AuthError::Oidc(format!("invalid issuer: {}", self.settings.authority)))?
            .pop_if_empty()
            .extend([".well-known", "openid-configuration"]);
        Ok(url)
    }

    async fn discover(&self) -> Result<ProviderMetadata, AuthError> {
        let url = self.discovery_url()?;
        tracing::debug!("Fetching OIDC discovery document: {}", url);

        let resp = self
            .bounded(self.http.get(url.clone()))
            .send()
            .await
            .map_err(|e| AuthError::Oidc(format!("discovery request to {} failed: {}", url, e)))?;

        if !resp.status().is_success() {
            return Err(AuthError::Oidc(format!(
                "discovery request to {} returned {}",
                url,
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| AuthError::Oidc(format!("invalid discovery document: {}", e)))
    }

    /// Authorization URL for a sign-in carrying `state`
    pub fn authorization_url(&self, endpoint: &str, state: &str) -> Result<Url, AuthError> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| AuthError::Oidc(format!("invalid authorization endpoint: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("scope", &self.settings.scope)
            .append_pair("state", state);
        Ok(url)
    }
}

#[async_trait]
impl OidcProvider for OidcClient {
    async fn get_user(&self) -> Option<OidcUser> {
        let raw = self.store.get(OIDC_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable OIDC user: {}", e);
                None
            }
        }
    }

    async fn sign_in_redirect(&self) -> Result<Url, AuthError> {
        let metadata = self.discover().await?;
        let state = uuid::Uuid::new_v4().to_string();
        self.store.set(OIDC_STATE_KEY, &state)?;
        self.authorization_url(&metadata.authorization_endpoint, &state)
    }

    async fn sign_in_callback(&self, code: &str, state: &str) -> Result<OidcUser, AuthError> {
        if self.store.get(OIDC_STATE_KEY).as_deref() != Some(state) {
            return Err(AuthError::StateMismatch);
        }
        self.store.remove(OIDC_STATE_KEY)?;

        let metadata = self.discover().await?;
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("client_id", self.settings.client_id.as_str()),
        ];

        let resp = self
            .bounded(self.http.post(&metadata.token_endpoint).form(&params))
            .send()
            .await
            .map_err(|e| AuthError::Oidc(format!("token exchange failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AuthError::Oidc(format!(
                "token exchange returned {}",
                resp.status()
            )));
        }

        let tokens: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::Oidc(format!("invalid token response: {}", e)))?;

        let user = OidcUser {
            expires_at: tokens
                .expires_in
                .map(|secs| self.clock.now() + TimeDelta::seconds(secs)),
            id_token: tokens.id_token,
            access_token: tokens.access_token,
        };

        let json = serde_json::to_string(&user).map_err(|e| AuthError::Store(e.to_string()))?;
        self.store.set(OIDC_USER_KEY, &json)?;

        tracing::debug!("OIDC sign-in completed");
        Ok(user)
    }

    async fn remove_user(&self) -> Result<(), AuthError> {
        self.store.remove(OIDC_USER_KEY)
    }
}
