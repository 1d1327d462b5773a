//! Cache Configuration Module
//!
//! Configuration structs are plain data with public fields. They are checked
//! once, when a cache is built from them, and a rejected configuration never
//! produces a partially usable cache.
//!
//! | Config | Caches |
//! |--------|--------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache), `ConcurrentLruCache` |
//!
//! # Examples
//!
//! ```
//! use sync_lru::config::LruCacheConfig;
//! use sync_lru::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None).unwrap();
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Zero capacity is rejected at construction time.
//! let bad = LruCacheConfig { capacity: 0 };
//! assert!(LruCache::<String, i32>::init(bad, None).is_err());
//! ```

pub mod lru;

pub use lru::LruCacheConfig;
