//! # Reelcache Service
//!
//! Cache-aside lookup of movie metadata.
//! Contains the key-value cache abstraction, the metadata provider client,
//! and the details service that composes them.

pub mod cache;
pub mod details_service;
pub mod provider;

pub use cache::*;
pub use details_service::*;
pub use provider::*;
