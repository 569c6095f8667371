//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache invariants that hold for arbitrary
//! inputs: round-trip storage, key determinism, capacity enforcement,
//! statistics accuracy and cleanup safety.

use proptest::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::cache::{CacheStore, PersistentStore};
use crate::models::SearchFilters;

// == Test Configuration ==
const TEST_MAX_MEMORY: usize = 100;
const TEST_DEFAULT_TTL_MS: u64 = 300_000;
const TEST_QUOTA_BYTES: usize = 4 * 1024 * 1024;

fn test_store() -> (CacheStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let persistent = PersistentStore::with_dir(temp_dir.path().to_path_buf(), TEST_QUOTA_BYTES);
    (
        CacheStore::new(persistent, TEST_MAX_MEMORY, TEST_DEFAULT_TTL_MS),
        temp_dir,
    )
}

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,48}"
}

/// Generates JSON payloads like the ones the client caches
fn payload_strategy() -> impl Strategy<Value = Value> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| json!({ "title": s }))
}

/// Generates ingredient lists
fn ingredients_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{2,12}", 1..8)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, payload: Value },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), payload_strategy())
            .prop_map(|(key, payload)| CacheOp::Set { key, payload }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Storing a payload and reading it back before expiry returns the exact
    // payload that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), payload in payload_strategy()) {
        let (mut store, _dir) = test_store();

        store.set(&key, payload.clone(), None);

        prop_assert_eq!(store.get(&key), Some(payload));
    }

    // After a delete, a get returns nothing.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), payload in payload_strategy()) {
        let (mut store, _dir) = test_store();

        store.set(&key, payload, None);
        prop_assert!(store.get(&key).is_some());

        store.delete(&key);

        prop_assert!(store.get(&key).is_none());
    }

    // Storing twice under the same key yields the second payload.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let (mut store, _dir) = test_store();

        store.set(&key, first, None);
        store.set(&key, second.clone(), None);

        prop_assert_eq!(store.get(&key), Some(second));
        prop_assert_eq!(store.memory_len(), 1);
    }

    // The memory tier never exceeds its capacity, whatever the inputs.
    #[test]
    fn prop_memory_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), payload_strategy()), 1..120)
    ) {
        let max_memory = 25;
        let temp_dir = TempDir::new().unwrap();
        let persistent =
            PersistentStore::with_dir(temp_dir.path().to_path_buf(), TEST_QUOTA_BYTES);
        let mut store = CacheStore::new(persistent, max_memory, TEST_DEFAULT_TTL_MS);

        for (key, payload) in entries {
            store.set(&key, payload, None);
            prop_assert!(
                store.memory_len() <= max_memory,
                "Memory tier size {} exceeds capacity {}",
                store.memory_len(),
                max_memory
            );
        }
    }

    // Hit and miss counters exactly mirror what the operations observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let (mut store, _dir) = test_store();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, payload } => {
                    store.set(&key, payload, None);
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.memory_items, store.memory_len(), "Memory items mismatch");
    }

    // Search keys are invariant under any reordering of the ingredient list.
    #[test]
    fn prop_search_key_order_independent(ingredients in ingredients_strategy()) {
        let filters = SearchFilters::default();
        let forward = crate::cache::keys::search_key(&ingredients, &filters);

        let mut reversed = ingredients.clone();
        reversed.reverse();
        let backward = crate::cache::keys::search_key(&reversed, &filters);

        prop_assert_eq!(forward, backward.clone());

        let mut sorted = ingredients;
        sorted.sort();
        let canonical = crate::cache::keys::search_key(&sorted, &filters);
        prop_assert_eq!(canonical, backward);
    }

    // Cleanup never removes an entry that is still inside its lifetime.
    #[test]
    fn prop_cleanup_preserves_valid_entries(
        entries in prop::collection::vec((key_strategy(), payload_strategy()), 1..20)
    ) {
        let (mut store, _dir) = test_store();

        for (key, payload) in &entries {
            store.set(key, payload.clone(), Some(TEST_DEFAULT_TTL_MS));
        }

        store.cleanup();

        for (key, _) in &entries {
            prop_assert!(
                store.get(key).is_some(),
                "Cleanup removed still-valid key '{}'",
                key
            );
        }
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // An entry stored with a TTL is gone once the TTL has elapsed.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), payload in payload_strategy()) {
        let (mut store, _dir) = test_store();

        store.set(&key, payload.clone(), Some(40));

        prop_assert_eq!(store.get(&key), Some(payload));

        std::thread::sleep(std::time::Duration::from_millis(80));

        prop_assert!(store.get(&key).is_none(), "Entry should expire after its TTL");
    }
}
