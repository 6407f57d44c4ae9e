//! Dependency injection module using Shaku.
//!
//! `ReelcacheModule` wires the Redis cache, the TMDB client and the
//! details lookup service for a single-process deployment.

use reelcache_config::AppConfig;
use reelcache_core::ReelResult;
use reelcache_service::{
    create_redis_pool, DetailsService, DetailsServiceImpl, DetailsServiceImplParameters,
    KeyValueCache, RedisCacheService, RedisCacheServiceParameters, TmdbClient,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub ReelcacheModule {
        components = [
            RedisCacheService,
            TmdbClient,
            DetailsServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the application module from configuration.
///
/// No network round trip happens here; Redis connections are opened lazily
/// by the pool.
pub fn build_module(config: &AppConfig) -> ReelResult<Arc<ReelcacheModule>> {
    let cache_pool = create_redis_pool(&config.redis)?;
    let provider = TmdbClient::new(&config.provider)?;

    let module = ReelcacheModule::builder()
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<TmdbClient>(provider.into_parameters())
        .with_component_parameters::<DetailsServiceImpl>(DetailsServiceImplParameters {
            ttl: config.redis.ttl(),
        })
        .build();

    info!(
        "Dependency module built (cache enabled: {}, ttl: {}s)",
        config.redis.enabled, config.redis.ttl_secs
    );

    Ok(Arc::new(module))
}

/// Trait for resolving the application's services from a module.
pub trait ServiceResolver {
    /// Resolves the details lookup service.
    fn details_service(&self) -> Arc<dyn DetailsService>;

    /// Resolves the key-value cache.
    fn cache(&self) -> Arc<dyn KeyValueCache>;
}

impl ServiceResolver for ReelcacheModule {
    fn details_service(&self) -> Arc<dyn DetailsService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn KeyValueCache> {
        self.resolve()
    }
}
