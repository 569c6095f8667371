//! Error types for the recipe client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Recipe Error Enum ==
/// Unified error type for recipe search and detail operations.
///
/// Storage failures never appear here: the cache tiers are advisory and
/// absorb their own errors, logging at `warn` and degrading to a miss or a
/// dropped write.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Caller supplied an empty ingredient list
    #[error("Please add at least one ingredient to search for recipes")]
    NoIngredients,

    /// No API key configured; checked before any network attempt
    #[error("API key is missing. Please configure your API key")]
    MissingApiKey,

    /// Upstream returned 402 (payment required / quota exhausted)
    #[error("Too many requests. Please wait a moment before searching again")]
    RateLimited,

    /// Upstream returned 401
    #[error("API key was rejected. Please check your configuration")]
    InvalidApiKey,

    /// Any other non-success HTTP status from the provider
    #[error("Recipe provider returned an error (status {0})")]
    Api(u16),

    /// Network/connectivity failure, surfaced after the retry bound
    #[error("Network request failed: {0}")]
    Transport(String),

    /// Provider payload could not be decoded
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the recipe client.
pub type Result<T> = std::result::Result<T, RecipeError>;
