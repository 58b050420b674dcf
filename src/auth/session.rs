//! Authentication session state machine
//!
//! States: unauthenticated, authenticated with a manual bearer token, or
//! authenticated through OIDC. The stored `authToken` exists iff the session
//! is in bearer mode.

use super::oidc::OidcProvider;
use super::store::{AUTH_TOKEN_KEY, TokenStore};
use super::token_cache::TokenCache;
use super::AuthError;
use std::sync::{Arc, PoisonError, RwLock};
use url::Url;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Bearer,
    Oidc,
}

impl AuthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::Bearer => "bearer",
            AuthState::Oidc => "oidc",
        }
    }
}

/// Prefix a raw token with `Bearer ` unless it already carries it
pub fn normalize_bearer(token: &str) -> String {
    let token = token.trim();
    if token.starts_with(BEARER_PREFIX) {
        token.to_string()
    } else {
        format!("{}{}", BEARER_PREFIX, token)
    }
}

pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    /// Present only when the hub has OIDC enabled
    oidc: Option<Arc<dyn OidcProvider>>,
    cache: Arc<TokenCache>,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Unauthenticated session; call [`AuthSession::initialize`] to restore a stored one
    pub fn new(
        store: Arc<dyn TokenStore>,
        oidc: Option<Arc<dyn OidcProvider>>,
        cache: Arc<TokenCache>,
    ) -> Self {
        Self {
            store,
            oidc,
            cache,
            state: RwLock::new(AuthState::Unauthenticated),
        }
    }

    /// Restore the session from storage
    ///
    /// A live OIDC user wins over a stored bearer token.
    pub async fn initialize(
        store: Arc<dyn TokenStore>,
        oidc: Option<Arc<dyn OidcProvider>>,
        cache: Arc<TokenCache>,
    ) -> Result<Self, AuthError> {
        let session = Self::new(store, oidc, cache);

        if let Some(oidc) = &session.oidc {
            let now = session.cache.clock().now();
            match oidc.get_user().await {
                Some(user) if !user.is_expired(now) => {
                    session.store.remove(AUTH_TOKEN_KEY)?;
                    session.cache.store(user.id_token);
                    session.set_state(AuthState::Oidc);
                    tracing::debug!("Restored OIDC session");
                    return Ok(session);
                }
                Some(_) => tracing::debug!("Stored OIDC session has expired"),
                None => {}
            }
        }

        if session.store.get(AUTH_TOKEN_KEY).is_some() {
            session.set_state(AuthState::Bearer);
            tracing::debug!("Restored bearer token session");
        }

        Ok(session)
    }

    pub fn state(&self) -> AuthState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: AuthState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() != AuthState::Unauthenticated
    }

    pub fn oidc_enabled(&self) -> bool {
        self.oidc.is_some()
    }

    pub fn token_cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    /// Manual login with a pasted token
    pub fn login(&self, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }

        self.store.set(AUTH_TOKEN_KEY, &normalize_bearer(token))?;
        self.cache.clear();
        self.set_state(AuthState::Bearer);
        tracing::debug!("Logged in with bearer token");
        Ok(())
    }

    /// Begin an OIDC sign-in; returns the URL the user must open
    pub async fn login_with_oidc(&self) -> Result<Url, AuthError> {
        let oidc = self.oidc.as_ref().ok_or(AuthError::OidcDisabled)?;
        oidc.sign_in_redirect().await
    }

    /// Finish an OIDC sign-in with the code delivered to the callback
    pub async fn complete_oidc_login(&self, code: &str, state: &str) -> Result<(), AuthError> {
        let oidc = self.oidc.as_ref().ok_or(AuthError::OidcDisabled)?;
        let user = oidc.sign_in_callback(code, state).await?;

        self.store.remove(AUTH_TOKEN_KEY)?;
        self.cache.store(user.id_token);
        self.set_state(AuthState::Oidc);
        tracing::debug!("Logged in with OIDC");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        if self.state() == AuthState::Oidc {
            if let Some(oidc) = &self.oidc {
                oidc.remove_user().await?;
            }
        }

        self.store.remove(AUTH_TOKEN_KEY)?;
        self.cache.clear();
        self.set_state(AuthState::Unauthenticated);
        tracing::debug!("Logged out");
        Ok(())
    }

    /// Stored bearer token, verbatim
    pub fn bearer_token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// Current OIDC ID token, served from the cache when fresh
    pub async fn id_token(&self) -> Option<String> {
        if let Some(token) = self.cache.get() {
            return Some(token);
        }

        let user = self.oidc.as_ref()?.get_user().await?;
        self.cache.store(user.id_token.clone());
        Some(user.id_token)
    }
}
