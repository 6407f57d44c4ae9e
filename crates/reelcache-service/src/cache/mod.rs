//! Caching infrastructure for the service layer.
//!
//! This module provides a key-value cache abstraction with a Redis
//! implementation and an in-process implementation with the same
//! expiry semantics.

mod cache_interface;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, KeyValueCache};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
