//! Cache Statistics Module
//!
//! Tracks cache performance metrics across both tiers: hits, misses,
//! promotions from the persistent tier, and memory-tier evictions.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from either tier
    pub hits: u64,
    /// Number of lookups that found nothing valid
    pub misses: u64,
    /// Number of entries restored from the persistent tier into memory
    pub promotions: u64,
    /// Number of entries evicted from the memory tier at capacity
    pub evictions: u64,
    /// Current number of entries in the memory tier
    pub memory_items: usize,
    /// Current number of entries in the persistent tier
    pub persistent_items: usize,
    /// Approximate serialized size of the persistent document in bytes
    pub persistent_size_bytes: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Promotion ==
    /// Increments the promotion counter.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
