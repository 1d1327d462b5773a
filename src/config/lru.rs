//! Configuration for the Least Recently Used (LRU) cache.
//!
//! Capacity is the only knob: the maximum number of entries kept at once. It
//! is fixed for the lifetime of the cache and has no default.

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Examples
///
/// ```
/// use sync_lru::config::LruCacheConfig;
///
/// let config = LruCacheConfig::new(128);
/// assert_eq!(config.validate().unwrap().get(), 128);
/// assert!(LruCacheConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold. Must be at least 1.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a configuration for a cache holding at most `capacity` entries.
    ///
    /// The value is not checked until the configuration is used to build a cache
    /// or [`validate`](Self::validate) is called.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks the configuration and returns the capacity as a `NonZeroUsize`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `capacity` is zero.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(CacheError::InvalidConfiguration {
            reason: "capacity must be at least 1",
        })
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self::new(capacity.get())
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
