//! Bounded caching for measurements
//!
//! Measurements are cheap to keep and expensive to redo, but a long-lived
//! host can see an unbounded stream of font sizes. [`BoundedCache`] keeps
//! the most recently used entries and forgets the rest, tracking how well
//! it is doing along the way.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Default capacity when a zero capacity is requested
const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(v) => v,
    None => unreachable!(),
};

/// LRU cache with hit/miss bookkeeping
pub struct BoundedCache<K: Hash + Eq, V: Copy> {
    cache: LruCache<K, V>,
    metrics: CacheMetrics,
}

impl<K: Hash + Eq, V: Copy> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (0 means default)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: LruCache::new(capacity),
            metrics: CacheMetrics::default(),
        }
    }

    /// Look up an entry, counting the hit or miss
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.cache.get(key) {
            Some(value) => {
                self.metrics.hits += 1;
                Some(*value)
            },
            None => {
                self.metrics.misses += 1;
                None
            },
        }
    }

    /// Remember a value, evicting the least recently used entry when full
    pub fn insert(&mut self, key: K, value: V) {
        let evicting = self.cache.len() == self.cache.cap().get() && !self.cache.contains(&key);
        self.cache.put(key, value);
        if evicting {
            self.metrics.evictions += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
    }
}

/// Everything you need to know about cache performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
