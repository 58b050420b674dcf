//! Wiring from configuration to an authenticated client

use super::{OcmClient, ReqwestTransport};
use crate::auth::{
    AuthSession, FileTokenStore, HeaderBuilder, OidcClient, OidcProvider, SystemClock, TokenCache,
    TokenStore,
};
use crate::config::{Config, paths};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Everything a command needs to talk to the dashboard backend
pub struct Connection {
    pub client: OcmClient,
    pub session: Arc<AuthSession>,
    /// Shared with the event stream so both use the same connection pool;
    /// it carries no total request timeout
    pub http: reqwest::Client,
}

/// Build the client and restore the persisted session
///
/// The auth config is fetched anonymously; if it cannot be fetched OIDC is
/// treated as disabled.
pub async fn connect(config: &Config) -> Result<Connection> {
    let base_url = config.api_url()?;
    let timeout = config
        .request_timeout()
        .context("requestTimeout is not a valid duration")?;
    let ttl = config
        .token_cache_ttl()
        .context("tokenCacheTtl is not a valid duration")?;

    let transport = Arc::new(ReqwestTransport::new(timeout)?);
    let http = transport.client().clone();
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(paths::session_path()));
    let clock = Arc::new(SystemClock);

    let auth_config = OcmClient::anonymous(base_url.clone(), transport.clone())
        .fetch_auth_config()
        .await;

    let oidc = auth_config.oidc_settings().map(|settings| {
        tracing::debug!("OIDC enabled with authority {}", settings.authority);
        Arc::new(
            OidcClient::new(settings, http.clone(), store.clone(), clock.clone())
                .with_timeout(timeout),
        ) as Arc<dyn OidcProvider>
    });

    let cache = Arc::new(TokenCache::new(ttl, clock));
    let session = Arc::new(
        AuthSession::initialize(store, oidc, cache)
            .await
            .context("Failed to restore auth session")?,
    );
    tracing::debug!("Auth session state: {}", session.state().as_str());

    let client = OcmClient::new(base_url, transport, HeaderBuilder::new(session.clone()));

    Ok(Connection {
        client,
        session,
        http,
    })
}
