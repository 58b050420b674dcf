//! Persistent token storage
//!
//! Key/value store for session credentials. The file store keeps a small
//! JSON map in the data directory.

use super::AuthError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Bearer token, stored already prefixed with `Bearer `
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Serialized [`super::OidcUser`]
pub const OIDC_USER_KEY: &str = "oidc.user";
/// `state` of a pending OIDC sign-in
pub const OIDC_STATE_KEY: &str = "oidc.state";

pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// In-memory store, used when nothing should outlive the process
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// JSON file backed store
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store at `path`; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuthError::Store(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AuthError::Store(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            AuthError::Store(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// In-memory entries change only once the file write succeeded
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        store.set(AUTH_TOKEN_KEY, "Bearer abc").unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("Bearer abc"));
        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::open(&path);
        store.set(AUTH_TOKEN_KEY, "Bearer abc").unwrap();
        store.set(OIDC_STATE_KEY, "s1").unwrap();

        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).as_deref(), Some("Bearer abc"));

        reopened.remove(AUTH_TOKEN_KEY).unwrap();
        let reopened = FileTokenStore::open(&path);
        assert!(reopened.get(AUTH_TOKEN_KEY).is_none());
        assert_eq!(reopened.get(OIDC_STATE_KEY).as_deref(), Some("s1"));
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::open(&path);
        store.set(AUTH_TOKEN_KEY, "Bearer abc").unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.set(AUTH_TOKEN_KEY, "Bearer new").is_err());
        assert!(store.remove(AUTH_TOKEN_KEY).is_err());
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::open(&path);
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        store.set(AUTH_TOKEN_KEY, "Bearer x").unwrap();
        assert_eq!(
            FileTokenStore::open(&path).get(AUTH_TOKEN_KEY).as_deref(),
            Some("Bearer x")
        );
    }
}
