//! Auth session state machine tests
//!
//! Exercises the transitions against a file-backed token store and checks
//! that the stored bearer token exists exactly while in bearer mode.

use async_trait::async_trait;
use mockall::mock;
use ocmdash::auth::{
    AUTH_TOKEN_KEY, AuthError, AuthSession, AuthState, FileTokenStore, HeaderBuilder,
    MemoryTokenStore, OidcProvider, OidcUser, TokenCache, TokenStore,
};
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;
use url::Url;

mock! {
    pub Oidc {}

    #[async_trait]
    impl OidcProvider for Oidc {
        async fn get_user(&self) -> Option<OidcUser>;
        async fn sign_in_redirect(&self) -> Result<Url, AuthError>;
        async fn sign_in_callback(&self, code: &str, state: &str) -> Result<OidcUser, AuthError>;
        async fn remove_user(&self) -> Result<(), AuthError>;
    }
}

fn user(token: &str) -> OidcUser {
    OidcUser {
        id_token: token.to_string(),
        access_token: None,
        expires_at: None,
    }
}

fn assert_token_invariant(session: &AuthSession, store: &dyn TokenStore) {
    assert_eq!(
        store.get(AUTH_TOKEN_KEY).is_some(),
        session.state() == AuthState::Bearer,
        "authToken must exist exactly in bearer mode (state: {:?})",
        session.state()
    );
}

#[tokio::test]
async fn test_bearer_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = Arc::new(FileTokenStore::open(&path));
    let session = AuthSession::initialize(store.clone(), None, Arc::new(TokenCache::default()))
        .await
        .unwrap();
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(!session.is_authenticated());

    session.login("  my-token ").unwrap();
    assert_eq!(session.state(), AuthState::Bearer);
    assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("Bearer my-token"));
    assert_token_invariant(&session, store.as_ref());

    let reopened = Arc::new(FileTokenStore::open(&path));
    let restored = AuthSession::initialize(reopened.clone(), None, Arc::new(TokenCache::default()))
        .await
        .unwrap();
    assert_eq!(restored.state(), AuthState::Bearer);

    restored.logout().await.unwrap();
    assert_eq!(restored.state(), AuthState::Unauthenticated);
    assert_token_invariant(&restored, reopened.as_ref());
    assert!(FileTokenStore::open(&path).get(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_failed_write_leaves_session_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let store = Arc::new(FileTokenStore::open(blocker.join("session.json")));
    let session = Arc::new(AuthSession::new(
        store.clone(),
        None,
        Arc::new(TokenCache::default()),
    ));

    assert!(matches!(session.login("secret"), Err(AuthError::Store(_))));
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
    assert_token_invariant(&session, store.as_ref());

    let headers = HeaderBuilder::new(session).headers().await;
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_unauthenticated_session_ignores_stray_token() {
    let store = Arc::new(MemoryTokenStore::new());
    let session = Arc::new(AuthSession::new(
        store.clone(),
        None,
        Arc::new(TokenCache::default()),
    ));
    store.set(AUTH_TOKEN_KEY, "Bearer stray").unwrap();

    let headers = HeaderBuilder::new(session).headers().await;
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_prefix_not_duplicated() {
    let store = Arc::new(MemoryTokenStore::new());
    let session = AuthSession::new(store.clone(), None, Arc::new(TokenCache::default()));

    session.login("Bearer abc").unwrap();
    assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("Bearer abc"));
    assert!(matches!(session.login("   "), Err(AuthError::EmptyToken)));
    assert_eq!(session.state(), AuthState::Bearer);
}

#[tokio::test]
async fn test_oidc_disabled() {
    let session = AuthSession::new(
        Arc::new(MemoryTokenStore::new()),
        None,
        Arc::new(TokenCache::default()),
    );
    assert!(!session.oidc_enabled());
    assert!(matches!(
        session.login_with_oidc().await,
        Err(AuthError::OidcDisabled)
    ));
}

#[tokio::test]
async fn test_oidc_login_clears_bearer_token() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(AUTH_TOKEN_KEY, "Bearer stale").unwrap();

    let mut oidc = MockOidc::new();
    oidc.expect_get_user().returning(|| None);
    oidc.expect_sign_in_redirect()
        .returning(|| Ok(Url::parse("https://idp.example.com/authorize?state=s1").unwrap()));
    oidc.expect_sign_in_callback()
        .withf(|code, state| code == "code-1" && state == "s1")
        .returning(|_, _| Ok(user("id-token-1")));
    oidc.expect_remove_user().times(1).returning(|| Ok(()));

    let cache = Arc::new(TokenCache::default());
    let session = Arc::new(
        AuthSession::initialize(store.clone(), Some(Arc::new(oidc)), cache)
            .await
            .unwrap(),
    );
    assert_eq!(session.state(), AuthState::Bearer);

    let url = session.login_with_oidc().await.unwrap();
    assert_eq!(url.host_str(), Some("idp.example.com"));

    session.complete_oidc_login("code-1", "s1").await.unwrap();
    assert_eq!(session.state(), AuthState::Oidc);
    assert_token_invariant(&session, store.as_ref());

    let headers = HeaderBuilder::new(session.clone()).headers().await;
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer id-token-1");

    session.logout().await.unwrap();
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(session.token_cache().get().is_none());
    assert_token_invariant(&session, store.as_ref());
}

#[tokio::test]
async fn test_live_oidc_user_wins_over_bearer_token() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(AUTH_TOKEN_KEY, "Bearer old").unwrap();

    let mut oidc = MockOidc::new();
    oidc.expect_get_user().returning(|| Some(user("id-token")));

    let cache = Arc::new(TokenCache::default());
    let session = AuthSession::initialize(store.clone(), Some(Arc::new(oidc)), cache)
        .await
        .unwrap();

    assert_eq!(session.state(), AuthState::Oidc);
    assert_token_invariant(&session, store.as_ref());
}
