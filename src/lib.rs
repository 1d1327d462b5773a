#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ConcurrentLruCache                        │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │ Mutex                                                 │  │
//! │  │  ┌─────────────────────────────────────────────────┐  │  │
//! │  │  │ LruCache                                        │  │  │
//! │  │  │                                                 │  │  │
//! │  │  │  HashMap<K, NodeId>     List<(K, V)>            │  │  │
//! │  │  │  ┌────┬────────┐        head              tail  │  │  │
//! │  │  │  │ k1 │ #2/g0  │──┐      ▼                  ▼   │  │  │
//! │  │  │  │ k2 │ #0/g3  │  └──▶ [k1] ⇄ [k2] ⇄ ... ⇄ [kN] │  │  │
//! │  │  │  └────┴────────┘                                │  │  │
//! │  │  └─────────────────────────────────────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns the entries. The lookup table stores `NodeId` handles, each an
//! arena index plus a generation, so a handle to an evicted entry never resolves.
//!
//! ## Invariants
//!
//! Before and after every public operation:
//!
//! 1. The keys of the lookup table and the keys of the list entries are the same
//!    set, one to one.
//! 2. The list never holds more entries than the configured capacity.
//! 3. The head of the list is the most recently inserted or read entry and the
//!    tail is the least recently touched one.
//!
//! ## Single-Threaded Usage
//!
//! ```rust
//! use sync_lru::LruCache;
//!
//! let mut cache = LruCache::new(3).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//! cache.get(&"a");
//! cache.put("d", 4);
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, ["d", "a", "c"]);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Single-threaded Least Recently Used cache
//! - [`config`]: Configuration structures
//! - [`error`]: Construction errors
//! - [`concurrent`]: Thread-safe cache (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Index-addressed doubly linked list backing the recency order.
///
/// This module is internal infrastructure. Entries are addressed by
/// generation-checked handles instead of pointers.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Concurrent cache implementation.
///
/// Provides a thread-safe LRU cache with a single lock domain guarding both
/// the lookup table and the recency list.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LruCacheConfig;
pub use error::{CacheError, Result};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
