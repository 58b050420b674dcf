//! Async resource bindings
//!
//! [`AsyncResource`] wraps a fetch with loading / error / refetch state and
//! publishes every transition on a `tokio::sync::watch` channel. The
//! per-resource constructors live in [`resources`].
//!
//! Each fetch runs in its own spawned task. `refetch` aborts the task in
//! flight and bumps a generation counter, so a result that was already
//! produced by an older fetch is never published. Dropping the resource
//! aborts its task.

pub mod resources;

pub use resources::{
    use_cluster, use_cluster_addons, use_cluster_detail, use_cluster_manifest_works,
    use_cluster_set, use_clusters, use_clusters_with_addons, use_placement,
};

use crate::api::FetchError;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// State of an [`AsyncResource`] at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
    /// Number of fetch results published so far
    pub updates: u64,
    generation: u64,
}

impl<T> ResourceSnapshot<T> {
    fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            updates: 0,
            generation: 0,
        }
    }
}

type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

pub struct AsyncResource<T> {
    fetch: FetchFn<T>,
    state: Arc<watch::Sender<ResourceSnapshot<T>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> AsyncResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create the resource and start the first fetch
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let (state, _) = watch::channel(ResourceSnapshot::pending());
        let resource = Self {
            fetch: Arc::new(move || Box::pin(fetch()) as BoxFuture<'static, _>),
            state: Arc::new(state),
            task: Mutex::new(None),
        };
        resource.refetch();
        resource
    }

    /// Abort any fetch in flight and start a new one
    ///
    /// Existing data stays visible while the new fetch is loading.
    pub fn refetch(&self) {
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.loading = true;
            generation = snapshot.generation;
        });

        let future = (self.fetch)();
        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            let result = future.await;
            state.send_if_modified(|snapshot| {
                if snapshot.generation != generation {
                    return false;
                }
                match result {
                    Ok(data) => {
                        snapshot.data = Some(data);
                        snapshot.error = None;
                    }
                    Err(e) => {
                        tracing::debug!("Resource fetch failed: {}", e);
                        snapshot.data = None;
                        snapshot.error = Some(e);
                    }
                }
                snapshot.loading = false;
                snapshot.updates += 1;
                true
            });
        });

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceSnapshot<T>> {
        self.state.subscribe()
    }

    /// Wait until the current fetch has published its result
    pub async fn settled(&self) -> ResourceSnapshot<T> {
        let mut receiver = self.state.subscribe();
        match receiver.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Wait for the current fetch and turn the snapshot into a result
    pub async fn load(&self) -> Result<Option<T>, FetchError> {
        let snapshot = self.settled().await;
        match snapshot.error {
            Some(e) => Err(e),
            None => Ok(snapshot.data),
        }
    }
}

impl<T> Drop for AsyncResource<T> {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}
