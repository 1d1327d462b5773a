//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache: one [`LruCache`] guarded by one lock. This is the
//! multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            ConcurrentLruCache            │
//! │                                          │
//! │  ┌────────────────────────────────────┐  │
//! │  │               Mutex                │  │
//! │  │  ┌──────────────┐ ┌─────────────┐  │  │
//! │  │  │ lookup table │ │ recency list│  │  │
//! │  │  │  K ─▶ NodeId │ │ MRU ··· LRU │  │  │
//! │  │  └──────────────┘ └─────────────┘  │  │
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Performance Characteristics
//!
//! | Metric | Value |
//! |--------|-------|
//! | Get/Put | O(1) average, one lock acquisition |
//! | Ordering | Global, linearizable |
//!
//! # Thread Safety
//!
//! `ConcurrentLruCache` is `Send + Sync` whenever its keys, values and hasher
//! are `Send`, and can be shared via `Arc`. Values are handed out as clones
//! (or through [`get_with`](ConcurrentLruCache::get_with) while the lock is
//! held), never as references that could outlive an eviction.

extern crate alloc;
extern crate std;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache with a single, globally ordered recency list.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. [`get`](Self::get) additionally needs `V: Clone`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use sync_lru::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(2).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// // "b" is now the least recently used entry.
/// cache.put("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.keys(), vec!["c", "a"]);
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> ConcurrentLruCache<K, V, DefaultHashBuilder> {
    /// Creates a concurrent LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a concurrent LRU cache from a configuration with an optional hasher.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if the configuration is rejected.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Result<Self> {
        Ok(Self::from_cache(LruCache::init(config, hasher)?))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Creates a concurrent LRU cache with a custom hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Ok(Self::from_cache(LruCache::with_hasher(
            capacity,
            hash_builder,
        )?))
    }

    /// Wraps an existing single-threaded cache, keeping its contents and order.
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Consumes the wrapper and returns the single-threaded cache inside.
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Returns the number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Retrieves a value and applies a function to it while holding the lock.
    ///
    /// On a hit the entry becomes the most recently used one, exactly as with
    /// [`get`](Self::get), but the value is not cloned. Keep `f` short: every
    /// other caller waits until it returns.
    ///
    /// # Deadlocks
    ///
    /// The lock is not reentrant. Calling any method of this cache from inside
    /// `f` deadlocks; return what you need from `f` and call back afterwards.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sync_lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4).unwrap();
    /// cache.put("key", String::from("hello world"));
    /// assert_eq!(cache.get_with("key", |v| v.len()), Some(11));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut cache = self.inner.lock();
        cache.get(key).map(f)
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains_key(key)
    }

    /// Checks under the lock that the lookup table and the recency list hold
    /// the same entries, that the list is well formed and that it stays within
    /// capacity.
    ///
    /// Recency order itself is not checked here.
    ///
    /// # Panics
    ///
    /// Panics if the lookup table and the recency list disagree.
    #[doc(hidden)]
    pub fn debug_validate_invariants(&self) {
        self.inner.lock().debug_validate_invariants();
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Inserts or updates an entry and marks it most recently used.
    ///
    /// If the key is new and the cache is full, the least recently used entry
    /// is evicted. Updating an existing key never evicts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sync_lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(8).unwrap();
    /// cache.put("key".to_string(), 42);
    /// cache.put("key".to_string(), 43);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Returns a snapshot of the cached keys from most to least recently used.
    ///
    /// Does not change the recency order.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(k, _)| k.clone()).collect()
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    /// Retrieves a value from the cache.
    ///
    /// Returns a **clone** of the value so no reference escapes the lock. For
    /// operations that don't need ownership, use [`get_with()`](Self::get_with).
    ///
    /// If the key exists, its entry is moved to the most recently used position
    /// in the same critical section as the lookup. A miss changes nothing.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Retrieves a clone of a value without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().peek(key).cloned()
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::format;
    use std::string::{String, ToString};
    use std::sync::Arc;
    use std::thread;
    use std::vec;

    #[test]
    fn test_basic_operations() {
        let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::new(100).unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);

        assert_eq!(cache.len(), 3);
        assert!(!cache.is_empty());

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.get("d"), None);
        assert_eq!(cache.capacity().get(), 100);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ConcurrentLruCache::<u32, u32>::new(0);
        assert!(matches!(
            result,
            Err(CacheError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_global_eviction_order() {
        let cache = ConcurrentLruCache::new(3).unwrap();
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.put(4, "four");

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.keys(), vec![4, 3, 2]);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_get_promotes_and_peek_does_not() {
        let cache = ConcurrentLruCache::new(2).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);

        assert_eq!(cache.peek(&'a'), Some(1));
        assert_eq!(cache.keys(), vec!['b', 'a']);

        assert_eq!(cache.get(&'a'), Some(1));
        assert_eq!(cache.keys(), vec!['a', 'b']);

        cache.put('c', 3);
        assert!(!cache.contains_key(&'b'));
        assert!(cache.contains_key(&'a'));
    }

    #[test]
    fn test_get_with() {
        let cache: ConcurrentLruCache<String, String> = ConcurrentLruCache::new(100).unwrap();

        cache.put("key".to_string(), "hello world".to_string());

        let len = cache.get_with("key", |v: &String| v.len());
        assert_eq!(len, Some(11));

        let missing = cache.get_with("missing", |v: &String| v.len());
        assert_eq!(missing, None);
    }

    #[test]
    fn test_get_with_releases_lock_before_returning() {
        let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(4).unwrap();
        cache.put(1, 10);

        let next = cache.get_with(&1, |v| *v + 1);
        assert_eq!(next, Some(11));

        // Feeding the result back in must not block on the lock `get_with` took.
        cache.put(1, next.unwrap());
        assert_eq!(cache.get(&1), Some(11));
        assert!(cache.inner.try_lock().is_some());
    }

    #[test]
    fn test_from_cache_and_into_inner() {
        let mut single = LruCache::new(4).unwrap();
        single.put(1, 10);
        single.put(2, 20);

        let cache = ConcurrentLruCache::from_cache(single);
        assert_eq!(cache.keys(), vec![2, 1]);
        cache.put(3, 30);

        let single = cache.into_inner();
        assert_eq!(single.len(), 3);
        assert_eq!(single.peek(&3), Some(&30));
    }

    #[test]
    fn test_debug_output() {
        let cache: ConcurrentLruCache<u8, u8> = ConcurrentLruCache::new(2).unwrap();
        let rendered = format!("{:?}", cache);
        assert!(rendered.contains("ConcurrentLruCache"));
        assert!(rendered.contains("capacity"));
    }

    #[test]
    fn test_concurrent_access() {
        let cache: Arc<ConcurrentLruCache<String, usize>> =
            Arc::new(ConcurrentLruCache::new(1000).unwrap());
        let num_threads = 8;
        let ops_per_thread = 100;

        let handles: vec::Vec<thread::JoinHandle<()>> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("thread_{}_key_{}", t, i);
                        cache.put(key.clone(), t * 1000 + i);
                        assert_eq!(cache.get(&key), Some(t * 1000 + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), num_threads * ops_per_thread);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_concurrent_mixed_operations() {
        let cache: Arc<ConcurrentLruCache<String, usize>> =
            Arc::new(ConcurrentLruCache::new(100).unwrap());
        let num_threads = 8;
        let ops_per_thread = 500;

        let handles: vec::Vec<thread::JoinHandle<()>> = (0..num_threads)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("key_{}", i % 200);
                        match i % 3 {
                            0 => cache.put(key, i),
                            1 => {
                                let _ = cache.get(&key);
                            }
                            _ => {
                                let _ = cache.get_with(&key, |v| *v + 1);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 100);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConcurrentLruCache<String, i32>>();
        assert_send_sync::<Arc<ConcurrentLruCache<u64, vec::Vec<u8>>>>();
    }
}
