//! Thread-safe bounded LRU cache.
//!
//! Wraps [`::lru::LruCache`] behind a [`parking_lot::Mutex`] that is held for a
//! single operation only. Values are cloned out on reads so callers can never
//! mutate what the cache stores.

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::cache::{CacheStats, TypoCache};

/// Least-recently-used cache with an optional capacity.
///
/// - `None` capacity: entries are never evicted.
/// - `Some(0)`: every insert is evicted immediately, the cache always misses.
/// - `Some(n)`: inserting the `n + 1`th key evicts the least recently used one.
pub struct LruCache<K, V> {
    /// `None` when the capacity is zero.
    entries: Mutex<Option<::lru::LruCache<K, V>>>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("entries", &self.len())
            .field("capacity", &self.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl<K: Hash + Eq, V: Clone> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let entries = NonZeroUsize::new(capacity).map(::lru::LruCache::new);
        Self::from_parts(entries, Some(capacity))
    }

    /// Create a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::from_parts(Some(::lru::LruCache::unbounded()), None)
    }

    /// Create a cache from an optional capacity, `None` meaning unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::new(capacity),
            None => Self::unbounded(),
        }
    }

    fn from_parts(entries: Option<::lru::LruCache<K, V>>, capacity: Option<usize>) -> Self {
        LruCache {
            entries: Mutex::new(entries),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up a value, marking it most recently used on a hit.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self
            .entries
            .lock()
            .as_mut()
            .and_then(|entries| entries.get(key).cloned());

        match value {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        value
    }

    /// Look up a value, falling back to `default` on a miss.
    pub fn get_or(&self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Look up a value without touching its recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries
            .lock()
            .as_ref()
            .and_then(|entries| entries.peek(key).cloned())
    }

    /// Check for a key without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .lock()
            .as_ref()
            .is_some_and(|entries| entries.contains(key))
    }

    /// Insert or overwrite an entry and make it the most recently used one.
    ///
    /// Returns the entry evicted to stay within capacity, if any.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let mut guard = self.entries.lock();
        let evicted = match guard.as_mut() {
            None => Some((key, value)),
            Some(entries) => {
                if entries.contains(&key) {
                    entries.put(key, value);
                    None
                } else {
                    entries.push(key, value)
                }
            }
        };
        drop(guard);

        if evicted.is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        evicted
    }

    /// Remove an entry, returning its value if it was present.
    pub fn pop(&self, key: &K) -> Option<V> {
        self.entries
            .lock()
            .as_mut()
            .and_then(|entries| entries.pop(key))
    }

    /// Remove an entry, falling back to `default` when it was absent.
    pub fn pop_or(&self, key: &K, default: V) -> V {
        self.pop(key).unwrap_or(default)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        if let Some(entries) = self.entries.lock().as_mut() {
            entries.clear();
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().as_ref().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity, `None` for an unbounded cache.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits,
            misses,
            evictions: self.evictions.load(Ordering::Relaxed),
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }
}

impl<K, V> TypoCache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn clear(&self) {
        LruCache::clear(self);
    }

    fn stats(&self) -> Option<CacheStats> {
        Some(LruCache::stats(self))
    }
}
