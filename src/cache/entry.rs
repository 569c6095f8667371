//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with payload and expiry metadata.
///
/// Entries are serialized as-is into the persistent tier, so the payload is
/// kept as an opaque JSON value rather than a typed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload (search results or a recipe detail object)
    pub data: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time to live in milliseconds
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(data: Value, ttl_ms: u64) -> Self {
        Self {
            data,
            created_at: current_timestamp_ms(),
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is valid strictly before
    /// `created_at + ttl_ms`; at or after that instant it is expired and
    /// must never be returned by a lookup.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at()
    }

    /// Returns the expiry instant (Unix milliseconds).
    pub fn expires_at(&self) -> u64 {
        self.created_at.saturating_add(self.ttl_ms)
    }

    // == Age ==
    /// Returns the entry's age in milliseconds.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    /// Whether the entry has consumed more than half of its lifetime.
    ///
    /// Used by the persistent tier's quota-recovery pass, which keeps only
    /// the fresher half of remaining lifetimes.
    pub fn past_half_life(&self) -> bool {
        self.age_ms() >= self.ttl_ms / 2
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
