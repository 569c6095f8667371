//! Recipe Finder - Ingredient-based recipe search client
//!
//! Composition root: wires configuration, the two-tier cache, the cleanup
//! task and the recipe client together, runs one search from the command
//! line and prints the results.
//!
//! Usage: `recipe_finder <ingredient> [<ingredient> ...]`

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_finder::storage::{FrequentIngredients, PreferencesStore, SearchHistory};
use recipe_finder::{
    spawn_cleanup_task, CacheStore, Config, PersistentStore, RecipeClient, SearchFilters,
};

/// Main entry point for the recipe finder CLI.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the persistent tier and build the cache store
/// 4. Start the background TTL cleanup task
/// 5. Run one search for the ingredients given on the command line
/// 6. Update the profile stores and print the results
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ingredients: Vec<String> = std::env::args().skip(1).collect();
    if ingredients.is_empty() {
        eprintln!("Usage: recipe_finder <ingredient> [<ingredient> ...]");
        std::process::exit(2);
    }

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_memory_items={}, default_ttl_ms={}, cleanup_interval={}s",
        config.max_memory_items, config.default_ttl_ms, config.cleanup_interval
    );

    // Open the persistent tier; fall back to a temp location if the
    // platform cache directory cannot be determined
    let persistent = PersistentStore::open(config.cache_quota_bytes).unwrap_or_else(|| {
        warn!("No cache directory available, using a temporary location");
        PersistentStore::with_dir(std::env::temp_dir(), config.cache_quota_bytes)
    });
    let cache = Arc::new(RwLock::new(CacheStore::new(
        persistent,
        config.max_memory_items,
        config.default_ttl_ms,
    )));
    info!("Cache store initialized");

    // Start background cleanup task (sweeps once immediately)
    let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);

    // Saved filter preferences seed the search, when present and fresh
    let preferences = PreferencesStore::open();
    let filters: SearchFilters = preferences
        .as_ref()
        .and_then(|store| store.load())
        .unwrap_or_default();

    let client = RecipeClient::new(&config, cache.clone());
    let recipes = client
        .search_recipes(&ingredients, &filters)
        .await
        .map_err(|err| {
            cleanup_handle.abort();
            anyhow::Error::new(err).context("recipe search failed")
        })?;

    // Best-effort profile updates
    if let Some(frequent) = FrequentIngredients::open() {
        for ingredient in &ingredients {
            frequent.record(ingredient);
        }
    }
    if let Some(history) = SearchHistory::open() {
        history.record(&ingredients, &filters, recipes.len());
    }
    if let Some(store) = preferences {
        store.save(&filters);
    }

    if recipes.is_empty() {
        println!("No recipes found for: {}", ingredients.join(", "));
    } else {
        println!(
            "Found {} recipe{} for: {}\n",
            recipes.len(),
            if recipes.len() == 1 { "" } else { "s" },
            ingredients.join(", ")
        );
        for recipe in &recipes {
            println!("  {} (#{})", recipe.title, recipe.id);
            println!(
                "    {} min | serves {} | rating {:.1}/5 | uses {} of your ingredients",
                recipe.ready_in_minutes,
                recipe.servings,
                recipe.rating,
                recipe.used_ingredients.len()
            );
            if !recipe.missed_ingredients.is_empty() {
                println!("    also needs: {}", recipe.missed_ingredients.join(", "));
            }
        }
    }

    let stats = client.cache_stats().await;
    info!(
        "Cache: {} in memory, {} persisted ({} bytes), hit rate {:.0}%",
        stats.memory_items,
        stats.persistent_items,
        stats.persistent_size_bytes,
        stats.hit_rate() * 100.0
    );

    cleanup_handle.abort();
    Ok(())
}
