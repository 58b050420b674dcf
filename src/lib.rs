//! Open Cluster Management dashboard client
//!
//! Typed access to the OCM dashboard backend: resource clients with a
//! fetch-failure fallback, an authentication session with bearer and OIDC
//! modes, async resource bindings, and a real-time cluster stream.
//! It can be used both as a binary and as a library for testing.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod hooks;
pub mod models;
pub mod stream;
pub mod views;

// Re-export commonly used types for convenience
pub use api::{FetchError, FetchErrorKind, HttpResponse, HttpTransport, OcmClient};
pub use auth::{AuthSession, AuthState, HeaderBuilder};
pub use hooks::{AsyncResource, ResourceSnapshot};
pub use stream::{ClusterEvent, ClusterList, StreamGuard, subscribe_clusters};
