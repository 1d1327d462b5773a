//! Error types for cache construction.
//!
//! The only fallible operation in this crate is building a cache. Once a cache
//! exists, `put` always succeeds and a lookup miss is reported as `None`, never
//! as an error.

use thiserror::Error;

/// Errors returned when a cache cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The supplied configuration cannot produce a usable cache.
    ///
    /// Raised when the requested capacity is zero.
    #[error("invalid cache configuration: {reason}")]
    InvalidConfiguration {
        /// Human readable description of the rejected setting.
        reason: &'static str,
    },
}

/// Result alias used by fallible constructors in this crate.
pub type Result<T, E = CacheError> = core::result::Result<T, E>;
