//! Cache Key Derivation
//!
//! Builds deterministic cache keys for searches and recipe details. Two
//! logically identical searches (same ingredient set in any order, same
//! filters) always derive the same key.

use crate::models::SearchFilters;

/// Derives the cache key for an ingredient search.
///
/// Ingredients are trimmed, lowercased and sorted before joining, so input
/// order never affects the key. Filters are serialized to their canonical
/// JSON form (struct fields serialize in declaration order).
pub fn search_key(ingredients: &[String], filters: &SearchFilters) -> String {
    let mut normalized: Vec<String> = ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .collect();
    normalized.sort();

    let filter_json =
        serde_json::to_string(filters).unwrap_or_else(|_| "{}".to_string());

    format!("search:{}:{}", normalized.join(","), filter_json)
}

/// Derives the cache key for a recipe detail lookup.
pub fn recipe_key(recipe_id: u64) -> String {
    format!("recipe:{}", recipe_id)
}
