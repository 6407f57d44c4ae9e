use async_trait::async_trait;
use reelcache_core::{Interface, MovieRecord, MovieSummary, ReelResult};

/// Source of authoritative movie metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Interface + Send + Sync {
    /// Fetches the full details document for one movie.
    ///
    /// Any non-200 response is `ReelError::ProviderUnavailable` carrying the status.
    async fn fetch_details(&self, movie_id: &str) -> ReelResult<MovieRecord>;

    /// Fetches the first page of the popular movies listing.
    async fn fetch_popular(&self) -> ReelResult<Vec<MovieSummary>>;
}
