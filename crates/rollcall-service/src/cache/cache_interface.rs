//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use rollcall_core::RollcallResult;
use shaku::Interface;
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
/// A read never reaches the store and absence is not an error.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RollcallResult<Option<String>>;

    /// Store a raw JSON value, overwriting whatever was there.
    ///
    /// `ttl` overrides the cache's default lifetime for this entry.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RollcallResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> RollcallResult<bool>;
}

/// Typed get/set on top of [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> RollcallResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache with the default lifetime.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> RollcallResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, None).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
