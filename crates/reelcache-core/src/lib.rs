//! # Reelcache Core
//!
//! Core types and error definitions for Reelcache.
//! This crate provides the foundational abstractions shared by the
//! configuration, service, and REST layers.

pub mod error;
pub mod movie;
pub mod result;

pub use error::*;
pub use movie::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
