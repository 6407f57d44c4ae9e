//! Redis-based cache implementation.

use super::KeyValueCache;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use reelcache_config::RedisConfig;
use reelcache_core::{ReelError, ReelResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached items (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Creates the Redis connection pool, or `None` when Redis is disabled.
///
/// Pool creation does not connect; an unreachable server surfaces on the
/// first command as `ReelError::CacheUnavailable`.
pub fn create_redis_pool(config: &RedisConfig) -> ReelResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled by configuration");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));

    let pool = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| ReelError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Some(Arc::new(pool)))
}

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = KeyValueCache)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ReelResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| ReelError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(ReelError::cache("Cache is disabled")),
        }
    }
}

/// Stored payloads are JSON text; anything else is a corrupt entry.
fn stored_text(key: &str, bytes: Vec<u8>) -> ReelResult<String> {
    String::from_utf8(bytes)
        .map_err(|e| ReelError::decode(format!("Value for key '{}' is not UTF-8: {}", key, e)))
}

#[async_trait]
impl KeyValueCache for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> ReelResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let bytes: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|e| ReelError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match bytes {
            Some(bytes) => {
                debug!("Cache hit for key '{}'", key);
                stored_text(key, bytes).map(Some)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ReelResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        // SETEX has one-second granularity and rejects zero.
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| ReelError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReelResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| ReelError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn clear(&self) -> ReelResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        deadpool_redis::redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| ReelError::cache(format!("Failed to flush database: {}", e)))?;

        info!("Flushed Redis cache database");
        Ok(())
    }

    async fn ping(&self) -> ReelResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| ReelError::cache(format!("Failed to ping Redis: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheExt;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_reads_absent_and_ignores_writes() {
        let cache = RedisCacheService::disabled();

        cache.set("550", &"value", DEFAULT_TTL).await.unwrap();
        let value: Option<String> = cache.get("550").await.unwrap();

        assert!(value.is_none());
        assert!(!cache.delete("550").await.unwrap());
        assert!(cache.clear().await.is_ok());
        assert!(cache.ping().await.is_ok());
    }

    #[test]
    fn test_stored_text_rejects_invalid_utf8() {
        let result = stored_text("550", vec![0xff, 0xfe]);
        assert!(matches!(result, Err(ReelError::Decode(_))));

        let text = stored_text("550", br#"{"id":550}"#.to_vec()).unwrap();
        assert_eq!(text, r#"{"id":550}"#);
    }

    #[test]
    fn test_pool_not_created_when_disabled() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        assert!(create_redis_pool(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_cache_unavailable() {
        // Port 1 on loopback refuses connections.
        let config = RedisConfig {
            url: "redis://127.0.0.1:1/0".to_string(),
            ..RedisConfig::default()
        };
        let pool = create_redis_pool(&config).unwrap().unwrap();
        let cache = RedisCacheService::new(pool);

        let result = cache.get_raw("550").await;
        assert!(matches!(result, Err(ReelError::CacheUnavailable(_))));
    }
}
