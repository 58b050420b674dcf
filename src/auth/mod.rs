//! Authentication session layer
//!
//! Holds the credential used for dashboard API requests: either a manually
//! pasted bearer token persisted in the token store, or an OIDC ID token
//! obtained through the hub's identity provider.

mod headers;
mod oidc;
mod session;
mod store;
mod token_cache;

pub use headers::HeaderBuilder;
pub use oidc::{AuthConfig, OidcClient, OidcProvider, OidcSettings, OidcUser, id_token_expiry};
pub use session::{AuthSession, AuthState, normalize_bearer};
pub use store::{
    AUTH_TOKEN_KEY, FileTokenStore, MemoryTokenStore, OIDC_STATE_KEY, OIDC_USER_KEY, TokenStore,
};
pub use token_cache::{Clock, DEFAULT_TOKEN_TTL, SystemClock, TokenCache};

use crate::api::FetchError;
use thiserror::Error;

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OIDC authentication is not enabled on this hub")]
    OidcDisabled,

    #[error("token must not be empty")]
    EmptyToken,

    #[error("token store error: {0}")]
    Store(String),

    #[error("OIDC error: {0}")]
    Oidc(String),

    #[error("OIDC callback state does not match the pending sign-in")]
    StateMismatch,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
