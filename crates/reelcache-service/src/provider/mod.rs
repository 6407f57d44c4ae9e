//! Upstream movie metadata providers.

mod metadata_provider;
mod tmdb_client;

pub use metadata_provider::MetadataProvider;
#[cfg(test)]
pub use metadata_provider::MockMetadataProvider;
pub use tmdb_client::{TmdbClient, TmdbClientParameters};
