//! Read-through movie details lookup.

use crate::cache::{CacheExt, KeyValueCache, DEFAULT_TTL};
use crate::provider::MetadataProvider;
use async_trait::async_trait;
use reelcache_core::{Interface, MovieRecord, MovieSummary, ReelResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Movie details lookup service.
#[async_trait]
pub trait DetailsService: Interface + Send + Sync {
    /// Returns the details for a movie, consulting the cache before the provider.
    ///
    /// `Ok(None)` means the provider could not supply the movie. Lookups
    /// degrade provider failures to "not found"; cache connectivity and
    /// decode failures always reach the caller.
    async fn get_details(&self, movie_id: &str) -> ReelResult<Option<MovieRecord>>;

    /// Lists the provider's current popular movies. Not cached.
    async fn popular_movies(&self) -> ReelResult<Vec<MovieSummary>>;

    /// Removes one cached entry. Returns `true` if it existed.
    async fn evict(&self, movie_id: &str) -> ReelResult<bool>;

    /// Removes every cached entry.
    async fn clear_cache(&self) -> ReelResult<()>;
}

/// Cache-aside implementation of [`DetailsService`].
#[derive(Component)]
#[shaku(interface = DetailsService)]
pub struct DetailsServiceImpl {
    #[shaku(inject)]
    cache: Arc<dyn KeyValueCache>,
    #[shaku(inject)]
    provider: Arc<dyn MetadataProvider>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl DetailsServiceImpl {
    /// Creates a lookup service storing fetched records for `ttl`.
    pub fn new(
        cache: Arc<dyn KeyValueCache>,
        provider: Arc<dyn MetadataProvider>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            provider,
            ttl,
        }
    }
}

impl std::fmt::Debug for DetailsServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailsServiceImpl")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DetailsService for DetailsServiceImpl {
    async fn get_details(&self, movie_id: &str) -> ReelResult<Option<MovieRecord>> {
        debug!("Getting details for movie: {}", movie_id);

        if let Some(cached) = self.cache.get::<MovieRecord>(movie_id).await? {
            debug!("Cache hit for movie: {}", movie_id);
            return Ok(Some(cached));
        }

        let record = match self.provider.fetch_details(movie_id).await {
            Ok(record) => record,
            Err(e) if e.is_provider_failure() => {
                debug!("Provider has no details for movie {}: {}", movie_id, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.cache.set(movie_id, &record, self.ttl).await {
            warn!("Failed to cache movie {}: {}", movie_id, e);
        }

        Ok(Some(record))
    }

    async fn popular_movies(&self) -> ReelResult<Vec<MovieSummary>> {
        match self.provider.fetch_popular().await {
            Ok(movies) => Ok(movies),
            Err(e) if e.is_provider_failure() => {
                warn!("Popular movies unavailable: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn evict(&self, movie_id: &str) -> ReelResult<bool> {
        let deleted = self.cache.delete(movie_id).await?;
        info!("Evicted movie {} from cache: {}", movie_id, deleted);
        Ok(deleted)
    }

    async fn clear_cache(&self) -> ReelResult<()> {
        self.cache.clear().await?;
        info!("Cleared movie cache");
        Ok(())
    }
}
