//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rollcall_core::RollcallResult;
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// A stored value with its bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub stored_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn new(key: &str, value: &str, ttl: Option<Duration>) -> Self {
        let stored_at = Utc::now();
        let expires_at = ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| stored_at.checked_add_signed(ttl));
        Self {
            key: key.to_string(),
            value: value.to_string(),
            stored_at,
            expires_at,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Process-wide cache held in a map.
///
/// One instance is created at startup and shared through the DI module. The
/// lock is only held for a single map operation, never across an `.await`.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Lifetime applied when a write does not pass its own. `None` keeps
    /// entries until they are invalidated.
    default_ttl: Option<Duration>,
    #[shaku(default = true)]
    enabled: bool,
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCacheService {
    /// Creates an enabled cache without expiry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: None,
            enabled: true,
        }
    }

    /// Creates an enabled cache whose entries expire after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            default_ttl: Some(ttl),
            ..Self::new()
        }
    }

    /// Creates a cache that stores nothing; every read misses.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the entry stored under `key`, if any.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    /// Removes the entry under `key` only if it is still expired once the
    /// write lock is held. A fresh value set in the meantime is kept.
    fn evict_if_expired(&self, key: &str) -> bool {
        let mut entries = self.entries.write();
        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(Utc::now()));
        if expired {
            entries.remove(key);
            debug!("Evicted expired cache entry: {}", key);
        }
        expired
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn get_raw(&self, key: &str) -> RollcallResult<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }

        let now = Utc::now();
        let value = match self.entries.read().get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => None,
            None => return Ok(None),
        };

        if value.is_none() {
            self.evict_if_expired(key);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RollcallResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = CacheEntry::new(key, value, ttl.or(self.default_ttl));
        self.entries.write().insert(key.to_string(), entry);
        debug!("Cache set: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RollcallResult<bool> {
        if !self.enabled {
            return Ok(false);
        }

        let removed = self.entries.write().remove(key).is_some();
        debug!("Cache delete: {} (existed: {})", key, removed);
        Ok(removed)
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.read().len())
            .field("default_ttl", &self.default_ttl)
            .field("enabled", &self.enabled)
            .finish()
    }
}
