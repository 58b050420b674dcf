//! Real-time cluster stream
//!
//! Consumes `GET /api/stream/clusters` as server-sent events. The named
//! events `ADDED`, `MODIFIED` and `DELETED` are decoded into
//! [`ClusterEvent`]s and handed to a caller-supplied handler; transport and
//! decode failures are forwarded as [`ClusterEvent::Error`] without
//! classification.
//!
//! Reconnection follows the EventSource rules: after a dropped connection
//! the consumer waits for the server's `retry:` delay (or the configured
//! default) and reconnects with `Last-Event-ID`. A non-200 response closes
//! the stream for good.

mod list;
mod sse;

pub use list::ClusterList;
pub use sse::{SseEvent, SseParser};

use crate::api::{FetchError, api_url};
use crate::config::Config;
use crate::models::{Cluster, Normalize};
use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, HeaderValue};
use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use url::Url;

pub const EVENT_ADDED: &str = "ADDED";
pub const EVENT_MODIFIED: &str = "MODIFIED";
pub const EVENT_DELETED: &str = "DELETED";

const LAST_EVENT_ID: &str = "Last-Event-ID";

/// Reconnect delay used until the server sends `retry:`
pub const DEFAULT_RETRY: Duration = Duration::from_secs(3);

/// Change to the cluster collection
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterEvent {
    Added(Cluster),
    Modified(Cluster),
    Deleted { id: String },
    Error(String),
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Url(#[from] FetchError),

    #[error("failed to connect to cluster stream: {0}")]
    Connect(String),

    #[error("cluster stream returned HTTP {0}")]
    Status(u16),

    #[error("cluster stream read failed: {0}")]
    Read(String),
}

/// Connection settings for [`subscribe_clusters`]
#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub base_url: Url,
    /// Credential sent as the `token` query parameter
    pub token: Option<String>,
    pub retry: Duration,
    /// Development mode: no connection is opened
    pub dev_mode: bool,
}

impl StreamSettings {
    pub fn from_config(config: &Config, token: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: config.api_url()?,
            token,
            retry: config.stream_retry()?,
            dev_mode: config.dev_mode,
        })
    }
}

/// Stream URL with the token as a query parameter, `Bearer ` prefix removed
pub fn stream_url(base: &Url, token: Option<&str>) -> Result<Url, StreamError> {
    let mut url = api_url(base, &["stream", "clusters"])?;
    if let Some(token) = token {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        if !token.is_empty() {
            url.query_pairs_mut().append_pair("token", token);
        }
    }
    Ok(url)
}

/// Decode one server-sent event
///
/// Unknown event names are ignored and yield `None`.
pub fn decode_cluster_event(event: &SseEvent) -> Option<ClusterEvent> {
    match event.event.as_str() {
        EVENT_ADDED => Some(
            decode_cluster(&event.data).map_or_else(ClusterEvent::Error, ClusterEvent::Added),
        ),
        EVENT_MODIFIED => Some(
            decode_cluster(&event.data).map_or_else(ClusterEvent::Error, ClusterEvent::Modified),
        ),
        EVENT_DELETED => Some(match decode_deleted_id(&event.data) {
            Some(id) => ClusterEvent::Deleted { id },
            None => ClusterEvent::Error(format!(
                "DELETED event without a cluster id: {}",
                event.data
            )),
        }),
        other => {
            tracing::debug!("Ignoring cluster stream event '{}'", other);
            None
        }
    }
}

fn decode_cluster(data: &str) -> Result<Cluster, String> {
    let mut cluster: Cluster = serde_json::from_str(data)
        .map_err(|e| format!("failed to decode cluster event: {}", e))?;
    cluster.normalize();
    Ok(cluster)
}

/// `DELETED` carries only the id: `{"id": ".."}` or a bare string
fn decode_deleted_id(data: &str) -> Option<String> {
    let id = match serde_json::from_str::<serde_json::Value>(data) {
        Ok(serde_json::Value::Object(map)) => map
            .get("id")
            .or_else(|| map.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Ok(serde_json::Value::String(id)) => Some(id),
        Ok(_) => None,
        Err(_) => Some(data.trim().to_string()),
    };
    id.filter(|id| !id.is_empty())
}

/// Handle to a running subscription
///
/// `close` and `Drop` abort the connection task immediately.
#[derive(Debug, Default)]
pub struct StreamGuard {
    handle: Option<JoinHandle<()>>,
}

impl StreamGuard {
    /// Guard for a subscription that never delivers events
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.close();
    }
}

/// Subscribe to cluster changes with a fresh HTTP client
pub fn subscribe_clusters<H>(settings: StreamSettings, handler: H) -> StreamGuard
where
    H: FnMut(ClusterEvent) + Send + 'static,
{
    match reqwest::Client::builder().build() {
        Ok(http) => subscribe_clusters_with(http, settings, handler),
        Err(e) => {
            let mut handler = handler;
            handler(ClusterEvent::Error(format!("failed to build HTTP client: {}", e)));
            StreamGuard::inert()
        }
    }
}

/// Subscribe to cluster changes on an existing client
///
/// Must be called from within a tokio runtime unless `dev_mode` is set.
pub fn subscribe_clusters_with<H>(
    http: reqwest::Client,
    settings: StreamSettings,
    mut handler: H,
) -> StreamGuard
where
    H: FnMut(ClusterEvent) + Send + 'static,
{
    if settings.dev_mode {
        tracing::debug!("Development mode: cluster stream disabled");
        return StreamGuard::inert();
    }

    let url = match stream_url(&settings.base_url, settings.token.as_deref()) {
        Ok(url) => url,
        Err(e) => {
            handler(ClusterEvent::Error(e.to_string()));
            return StreamGuard::inert();
        }
    };

    let handle = tokio::spawn(async move {
        let mut parser = SseParser::new();
        loop {
            let connected = connect(&http, &url, parser.last_event_id()).await;
            match connected {
                Ok(response) => {
                    tracing::debug!("Cluster stream connected");
                    let result =
                        consume_event_stream(response.bytes_stream(), &mut parser, &mut handler)
                            .await;
                    if let Err(e) = result {
                        handler(ClusterEvent::Error(e.to_string()));
                    }
                }
                Err(e @ StreamError::Status(_)) => {
                    handler(ClusterEvent::Error(e.to_string()));
                    return;
                }
                Err(e) => handler(ClusterEvent::Error(e.to_string())),
            }

            parser.reset();
            let delay = parser.retry().unwrap_or(settings.retry);
            tracing::debug!("Cluster stream reconnecting in {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    });

    StreamGuard {
        handle: Some(handle),
    }
}

async fn connect(
    http: &reqwest::Client,
    url: &Url,
    last_event_id: Option<&str>,
) -> Result<reqwest::Response, StreamError> {
    let mut request = http
        .get(url.clone())
        .header(ACCEPT, HeaderValue::from_static("text/event-stream"));
    if let Some(id) = last_event_id {
        request = request.header(LAST_EVENT_ID, id);
    }

    let response = request
        .send()
        .await
        .map_err(|e| StreamError::Connect(e.to_string()))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(StreamError::Status(status));
    }
    Ok(response)
}

/// Feed a body stream through `parser` and dispatch decoded events
///
/// Returns when the body ends.
pub async fn consume_event_stream<S, B, E, H>(
    body: S,
    parser: &mut SseParser,
    handler: &mut H,
) -> Result<(), StreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    H: FnMut(ClusterEvent),
{
    let mut body = std::pin::pin!(body);
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| StreamError::Read(e.to_string()))?;
        for event in parser.feed(chunk.as_ref()) {
            if let Some(event) = decode_cluster_event(&event) {
                handler(event);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, data: &str) -> SseEvent {
        SseEvent {
            event: name.to_string(),
            data: data.to_string(),
            id: None,
        }
    }

    #[test]
    fn test_stream_url_strips_bearer() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let url = stream_url(&base, Some("Bearer abc.def")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/stream/clusters?token=abc.def"
        );

        let url = stream_url(&base, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/stream/clusters");
    }

    #[test]
    fn test_decode_added_recomputes_status() {
        let data = r#"{"name":"c1","status":"Online","conditions":[]}"#;
        match decode_cluster_event(&event("ADDED", data)) {
            Some(ClusterEvent::Added(cluster)) => {
                assert_eq!(cluster.id, "c1");
                assert!(!cluster.is_online());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_deleted_id_forms() {
        let deleted = |data| decode_cluster_event(&event("DELETED", data));
        let expected = Some(ClusterEvent::Deleted {
            id: "c1".to_string(),
        });
        assert_eq!(deleted(r#"{"id":"c1"}"#), expected);
        assert_eq!(deleted(r#""c1""#), expected);
        assert_eq!(deleted("c1"), expected);
        assert!(matches!(deleted("{}"), Some(ClusterEvent::Error(_))));
    }

    #[test]
    fn test_decode_errors_and_unknown_events() {
        assert!(matches!(
            decode_cluster_event(&event("MODIFIED", "not json")),
            Some(ClusterEvent::Error(_))
        ));
        assert_eq!(decode_cluster_event(&event("message", "{}")), None);
    }

    #[tokio::test]
    async fn test_dev_mode_guard_is_inert() {
        let settings = StreamSettings {
            base_url: Url::parse("http://localhost:8080").unwrap(),
            token: None,
            retry: DEFAULT_RETRY,
            dev_mode: true,
        };
        let guard = subscribe_clusters(settings, |_| panic!("no events in dev mode"));
        assert!(!guard.is_active());
    }
}
