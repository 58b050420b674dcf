//! Short-lived ID token cache
//!
//! Avoids a session lookup for every request while OIDC is active. The
//! cache holds a single token and expires it after a fixed window measured
//! on an injectable [`Clock`].

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Cache window for OIDC ID tokens
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Wall-clock source
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct TokenCache {
    entry: RwLock<Option<CachedToken>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl TokenCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::minutes(5)),
            clock,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Cached token if it has not expired yet
    pub fn get(&self) -> Option<String> {
        let entry = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        entry
            .as_ref()
            .filter(|cached| self.clock.now() < cached.expires_at)
            .map(|cached| cached.value.clone())
    }

    pub fn store(&self, value: String) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entry = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *entry = Some(CachedToken { value, expires_at });
    }

    pub fn clear(&self) {
        let mut entry = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *entry = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_TTL, Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn manual_clock(start: DateTime<Utc>) -> (Arc<Mutex<DateTime<Utc>>>, MockClock) {
        let now = Arc::new(Mutex::new(start));
        let handle = now.clone();
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(move || *handle.lock().unwrap());
        (now, clock)
    }

    #[test]
    fn test_token_expires_after_window() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let (now, clock) = manual_clock(start);
        let cache = TokenCache::new(DEFAULT_TOKEN_TTL, Arc::new(clock));

        assert!(cache.get().is_none());
        cache.store("id-token".to_string());

        *now.lock().unwrap() = start + TimeDelta::minutes(4);
        assert_eq!(cache.get().as_deref(), Some("id-token"));

        *now.lock().unwrap() = start + TimeDelta::minutes(5);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_clear() {
        let cache = TokenCache::default();
        cache.store("t".to_string());
        assert!(cache.get().is_some());
        cache.clear();
        assert!(cache.get().is_none());
    }
}
