//! Common test infrastructure for Redis integration tests.

use deadpool_redis::{redis::AsyncCommands, Pool};
use reelcache_config::RedisConfig;
use reelcache_service::{create_redis_pool, KeyValueCache, RedisCacheService};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Redis container wrapper.
///
/// Keeps the container alive for as long as the test holds it.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    /// Starts a fresh Redis container and waits until it answers PING.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            url: format!("redis://127.0.0.1:{}/0", port),
            pool_size: 4,
            ..RedisConfig::default()
        };

        let pool = create_redis_pool(&config)
            .expect("Failed to create Redis pool")
            .expect("Redis is enabled");

        Self::wait_until_ready(&pool, 30).await;

        Self {
            _container: container,
            pool,
        }
    }

    /// Returns a cache service backed by the container.
    pub fn cache(&self) -> RedisCacheService {
        RedisCacheService::new(Arc::clone(&self.pool))
    }

    /// Writes raw bytes under `key`, bypassing the cache service.
    pub async fn set_bytes(&self, key: &str, bytes: &[u8]) {
        let mut conn = self.pool.get().await.expect("Failed to get Redis connection");
        conn.set::<_, _, ()>(key, bytes)
            .await
            .expect("Failed to write raw value");
    }

    async fn wait_until_ready(pool: &Arc<Pool>, max_attempts: u32) {
        let cache = RedisCacheService::new(Arc::clone(pool));
        let mut attempts = 0;
        loop {
            attempts += 1;
            match cache.ping().await {
                Ok(()) => return,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Redis not ready after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                }
            }
        }
    }
}
