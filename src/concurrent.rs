//! Concurrent Cache Implementation
//!
//! This module provides the thread-safe LRU cache, [`ConcurrentLruCache`].
//!
//! # Architecture
//!
//! The cache keeps one [`LruCache`](crate::LruCache) behind one
//! `parking_lot::Mutex`. The lookup table and the recency list are always
//! touched together, inside the same critical section, so no caller can ever
//! observe one structure updated and the other not.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every `get()` is a write: a hit moves the entry to the front of the recency
//! list. A read lock would have to be upgraded on every hit, so `RwLock` buys
//! nothing and costs extra bookkeeping. `parking_lot::Mutex` is small, fair
//! enough under contention, and does not poison.
//!
//! ## Why Not Segments?
//!
//! Sharding the key space across independently locked segments would make the
//! recency order per-segment. Eviction must remove the globally least recently
//! used entry, and every operation must be linearizable, so the whole cache is
//! a single lock domain.
//!
//! # Lookup And Promotion Are One Step
//!
//! `get()` finds the entry and moves it to the front while holding the lock.
//! Splitting those two steps (looking up the handle outside the lock and only
//! locking for the move) would let a concurrent `put()` evict the entry in
//! between, and the move would then operate on an entry that is no longer in
//! the list.
//!
//! # Example
//!
//! ```rust
//! use sync_lru::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
