//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

/// Recipe client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the recipe provider, if configured
    pub api_key: Option<String>,
    /// Base URL of the recipe provider API
    pub base_url: String,
    /// Maximum number of recipes requested per search
    pub max_results: u32,
    /// Maximum number of entries the memory cache tier can hold
    pub max_memory_items: usize,
    /// Default TTL in milliseconds for cache entries without explicit TTL
    pub default_ttl_ms: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Minimum spacing between outbound requests in milliseconds
    pub rate_limit_delay_ms: u64,
    /// Maximum number of retries for a transport-level failure
    pub max_retries: u32,
    /// Size budget in bytes for the serialized persistent cache document
    pub cache_quota_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SPOONACULAR_API_KEY` - Recipe provider API key (no default)
    /// - `RECIPE_BASE_URL` - Provider base URL (default: https://api.spoonacular.com/recipes)
    /// - `MAX_RESULTS` - Recipes per search (default: 12)
    /// - `MAX_MEMORY_ITEMS` - Memory-tier capacity (default: 50)
    /// - `DEFAULT_TTL_MS` - Default entry TTL in ms (default: 300000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 300)
    /// - `RATE_LIMIT_DELAY_MS` - Inter-request spacing in ms (default: 1000)
    /// - `MAX_RETRIES` - Transport retry bound (default: 3)
    /// - `CACHE_QUOTA_BYTES` - Persistent document budget (default: 4194304)
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("SPOONACULAR_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: env::var("RECIPE_BASE_URL")
                .ok()
                .unwrap_or_else(|| "https://api.spoonacular.com/recipes".to_string()),
            max_results: env::var("MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            max_memory_items: env::var("MAX_MEMORY_ITEMS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            rate_limit_delay_ms: env::var("RATE_LIMIT_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            cache_quota_bytes: env::var("CACHE_QUOTA_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4 * 1024 * 1024),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.spoonacular.com/recipes".to_string(),
            max_results: 12,
            max_memory_items: 50,
            default_ttl_ms: 300_000,
            cleanup_interval: 300,
            rate_limit_delay_ms: 1000,
            max_retries: 3,
            cache_quota_bytes: 4 * 1024 * 1024,
        }
    }
}
