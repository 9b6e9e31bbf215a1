//! Caching of computed typo candidates.
//!
//! The engine memoizes the candidate list for every `(scope, typo)` pair it
//! computes. Any store implementing [`TypoCache`] can be plugged in; the
//! default is the bounded [`LruCache`].

pub mod lru;

use serde::{Deserialize, Serialize};

pub use self::lru::LruCache;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of stored entries.
    pub entries: usize,
    /// Configured capacity, `None` when unbounded.
    pub capacity: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// `hits / (hits + misses)`, zero before the first lookup.
    pub hit_rate: f64,
}

/// Key/value store used to memoize candidate lists.
///
/// Implementations must be safe to share between threads and must return
/// copies from [`get`](TypoCache::get): callers are free to mutate what they
/// receive without affecting the stored value.
pub trait TypoCache<K, V>: Send + Sync {
    /// Look up a value.
    fn get(&self, key: &K) -> Option<V>;

    /// Store a value, replacing any previous one.
    fn put(&self, key: K, value: V);

    /// Drop every stored value.
    fn clear(&self);

    /// Counters, when the store keeps them.
    fn stats(&self) -> Option<CacheStats> {
        None
    }
}
