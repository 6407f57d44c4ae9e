//! Application state for Axum handlers.

use reelcache_service::{DetailsService, KeyValueCache};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub details_service: Arc<dyn DetailsService>,
    /// Held directly for readiness probes.
    pub cache: Arc<dyn KeyValueCache>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(details_service: Arc<dyn DetailsService>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            details_service,
            cache,
        }
    }

    /// Resolves the state's services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn DetailsService> + HasComponent<dyn KeyValueCache>,
    {
        let details_service: Arc<dyn DetailsService> = module.resolve();
        let cache: Arc<dyn KeyValueCache> = module.resolve();
        Self::new(details_service, cache)
    }
}
