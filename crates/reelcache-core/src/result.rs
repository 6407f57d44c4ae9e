//! Result type aliases for Reelcache.

use crate::ReelError;

/// A specialized `Result` type for Reelcache operations.
pub type ReelResult<T> = Result<T, ReelError>;
