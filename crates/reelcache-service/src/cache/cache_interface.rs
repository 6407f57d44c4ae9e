//! Cache interface trait for abstracted caching operations.

use reelcache_core::{Interface, ReelResult};
use async_trait::async_trait;
use std::time::Duration;

/// Key-value cache for storing and retrieving JSON payloads with a TTL.
///
/// Implementations delegate expiry to the underlying store; an expired
/// entry reads exactly like a missing one. Store failures are returned as
/// `ReelError::CacheUnavailable` and never folded into `None`.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait KeyValueCache: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> ReelResult<Option<String>>;

    /// Set a raw JSON value in the cache, replacing any previous value and expiry.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ReelResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> ReelResult<bool>;

    /// Remove every entry in the cache's namespace.
    async fn clear(&self) -> ReelResult<()>;

    /// Round trip to the store, used by readiness checks.
    async fn ping(&self) -> ReelResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
///
/// This trait provides generic get/set methods that work with any serializable type.
#[async_trait]
pub trait CacheExt: KeyValueCache {
    /// Get a typed value from the cache.
    ///
    /// A stored payload that does not decode as `T` is a `ReelError::Decode`.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> ReelResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> ReelResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all KeyValueCache implementations
impl<T: KeyValueCache + ?Sized> CacheExt for T {}
