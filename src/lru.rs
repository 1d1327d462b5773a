//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides the single-threaded LRU core with O(1) operations. It
//! couples two structures that must always agree:
//!
//! - a recency `List` that owns every entry, most recently used at the front
//!   and least recently used at the back
//! - a lookup table mapping each key to the `NodeId` of its entry
//!
//! The lookup table never owns an entry. It only holds generation-checked
//! handles into the list, so a removed entry cannot be reached through a
//! leftover handle.
//!
//! # Algorithm
//!
//! - `put` on a new key attaches the entry at the front; if the cache was full,
//!   the entry at the back is evicted first, so at most one eviction happens per
//!   call.
//! - `put` on an existing key replaces the value in place and moves the entry
//!   to the front without evicting anything.
//! - `get` on a hit moves the entry to the front; a miss changes nothing.
//!
//! # Thread Safety
//!
//! `LruCache` takes `&mut self` for every operation that touches the recency
//! order, including `get`. For shared access use
//! [`ConcurrentLruCache`](crate::ConcurrentLruCache), which guards one
//! `LruCache` with a single lock.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::list::{self, List, NodeId};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on lookup table slots reserved at construction.
const MAX_PREALLOCATED: usize = 4096;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for inserting,
/// retrieving, and updating entries. When the cache is full, inserting a new key
/// evicts the least recently used entry.
///
/// # Examples
///
/// ```
/// use sync_lru::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    list: List<(K, V)>,
    map: HashMap<K, NodeId, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        LruCache::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if the configuration is rejected.
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        LruCache::with_config_and_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Self::with_config_and_hasher(LruCacheConfig::new(capacity), hash_builder)
    }

    /// Creates a new LRU cache from a configuration and a hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if the configuration is rejected.
    pub fn with_config_and_hasher(config: LruCacheConfig, hash_builder: S) -> Result<Self> {
        let cap = config.validate()?;
        log::debug!("creating LRU cache with capacity {}", cap);
        Ok(LruCache {
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(
                cap.get().min(MAX_PREALLOCATED),
                hash_builder,
            ),
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.list.cap()
    }

    /// Returns the number of entries currently in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the value for `key` and marks the entry most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.move_to_front(node);
        self.list.get(node).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key` and marks the entry
    /// most recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.move_to_front(node);
        self.list.get_mut(node).map(|(_, v)| v)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.get(node).map(|(_, v)| v)
    }

    /// Returns true if `key` is cached. Does not change its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    /// Iterates over the entries from most to least recently used.
    ///
    /// Iterating does not change the recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Checks that the lookup table and the recency list describe the same
    /// entries and that the list is well formed and within capacity.
    ///
    /// Recency order itself is not checked here.
    ///
    /// # Panics
    ///
    /// Panics if the structures disagree or the list is malformed.
    #[doc(hidden)]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate();
        assert_eq!(
            self.map.len(),
            self.list.len(),
            "lookup table and recency list disagree on entry count"
        );
        for (key, &node) in self.map.iter() {
            match self.list.get(node) {
                Some((stored, _)) => assert!(stored == key, "lookup table points at wrong entry"),
                None => panic!("lookup table holds a stale handle"),
            }
        }
    }

    /// Removes the least recently used entry from both structures.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        log::trace!(
            "evicted least recently used entry, {} of {} slots in use",
            self.list.len(),
            self.list.cap()
        );
        Some((key, value))
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates an entry and marks it most recently used.
    ///
    /// If `key` is already cached its value is replaced in place and nothing is
    /// evicted. Otherwise the entry is added at the front, and if the cache was
    /// full the least recently used entry is evicted.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&node) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(node) {
                entry.1 = value;
            }
            self.list.move_to_front(node);
            return;
        }

        if self.list.is_full() {
            self.evict_lru();
        }

        if let Some(node) = self.list.push_front((key.clone(), value)) {
            self.map.insert(key, node);
        }

        debug_assert_eq!(self.map.len(), self.list.len());
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.list.cap())
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over cache entries in most to least recently used order.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
