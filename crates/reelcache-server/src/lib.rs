//! # Reelcache Server Library
//!
//! Dependency injection wiring and startup utilities for the
//! Reelcache server binary.

pub mod di;
pub mod startup;
