//! # Reelcache REST
//!
//! REST API layer using Axum for Reelcache.
//! Provides HTTP endpoints for movie lookups, cache administration, and health checks.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
