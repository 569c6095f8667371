//! Cache Store Module
//!
//! Two-tier cache front combining the bounded in-memory map with the
//! durable on-disk document. Lookups check memory first, fall back to the
//! persistent tier, and promote persistent hits back into memory so
//! repeated access stays in-process.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionTracker, PersistentStore};

// == Cache Store ==
/// Two-tier TTL cache for API responses.
#[derive(Debug)]
pub struct CacheStore {
    /// In-process tier
    memory: HashMap<String, CacheEntry>,
    /// Insertion-order tracker backing memory eviction
    order: InsertionTracker,
    /// Durable tier
    persistent: PersistentStore,
    /// Lookup/eviction counters
    stats: CacheStats,
    /// Maximum number of entries the memory tier can hold
    max_memory_items: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore over the given persistent tier.
    ///
    /// # Arguments
    /// * `persistent` - Durable tier backing this store
    /// * `max_memory_items` - Memory-tier capacity
    /// * `default_ttl_ms` - TTL applied when `set` is called without one
    pub fn new(persistent: PersistentStore, max_memory_items: usize, default_ttl_ms: u64) -> Self {
        Self {
            memory: HashMap::new(),
            order: InsertionTracker::new(),
            persistent,
            stats: CacheStats::new(),
            max_memory_items,
            default_ttl_ms,
        }
    }

    // == Set ==
    /// Stores a payload under a key with an optional TTL.
    ///
    /// The entry is written to both tiers. If the memory tier is at
    /// capacity and the key is new, the oldest-inserted entry is evicted
    /// from memory first (it may still live in the persistent tier).
    pub fn set(&mut self, key: &str, data: Value, ttl_ms: Option<u64>) {
        let entry = CacheEntry::new(data, ttl_ms.unwrap_or(self.default_ttl_ms));

        self.set_memory(key, entry.clone());
        self.persistent.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// Memory tier first: a valid entry returns immediately with no
    /// persistent-tier read. Otherwise the persistent tier is consulted,
    /// and a valid entry there is promoted into memory before returning.
    /// Expired or absent entries yield `None`; a miss is never an error.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(entry) = self.memory.get(key) {
            if !entry.is_expired() {
                self.stats.record_hit();
                return Some(entry.data.clone());
            }
            // Expired in memory: drop it to free the bounded slot
            self.memory.remove(key);
            self.order.remove(key);
        }

        if let Some(entry) = self.persistent.get(key) {
            if !entry.is_expired() {
                debug!("Promoting '{}' from persistent tier", key);
                let data = entry.data.clone();
                self.set_memory(key, entry);
                self.stats.record_promotion();
                self.stats.record_hit();
                return Some(data);
            }
        }

        self.stats.record_miss();
        None
    }

    // == Has ==
    /// Checks whether a valid entry exists for the key.
    ///
    /// Counts as a lookup: promotion and stats behave exactly as in `get`.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes an entry from both tiers.
    pub fn delete(&mut self, key: &str) {
        self.memory.remove(key);
        self.order.remove(key);
        self.persistent.remove(key);
    }

    // == Clear ==
    /// Empties both tiers entirely.
    pub fn clear(&mut self) {
        self.memory.clear();
        self.order.clear();
        self.persistent.clear();
    }

    // == Cleanup ==
    /// Sweeps both tiers, removing every expired entry.
    ///
    /// Valid entries are never touched. Returns the number of entries
    /// removed across both tiers.
    pub fn cleanup(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .memory
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = expired_keys.len();
        for key in expired_keys {
            self.memory.remove(&key);
            self.order.remove(&key);
        }

        removed += self.persistent.cleanup();
        removed
    }

    // == Stats ==
    /// Returns current cache statistics. Read-only.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.memory_items = self.memory.len();
        stats.persistent_items = self.persistent.len();
        stats.persistent_size_bytes = self.persistent.size_bytes();
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the memory tier.
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Checks whether the memory tier currently holds the key.
    pub fn in_memory(&self, key: &str) -> bool {
        self.memory.contains_key(key)
    }

    // == Memory Tier Write ==
    /// Inserts into the memory tier, evicting the oldest insertion when a
    /// new key arrives at capacity. Overwriting keeps the original slot.
    fn set_memory(&mut self, key: &str, entry: CacheEntry) {
        let is_new = !self.memory.contains_key(key);

        if is_new && self.memory.len() >= self.max_memory_items {
            if let Some(evicted) = self.order.evict_oldest() {
                self.memory.remove(&evicted);
                self.stats.record_eviction();
                debug!("Evicted oldest memory entry '{}'", evicted);
            }
        }

        self.memory.insert(key.to_string(), entry);
        self.order.record(key);
    }
}
