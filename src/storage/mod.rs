//! Profile Storage Module
//!
//! Durable, best-effort stores for user-profile data: filter preferences,
//! frequently used ingredients, favorite recipes and search history. Each
//! is one JSON document on disk; absence or corruption degrades to the
//! default state and never surfaces an error.

mod document;
mod favorites;
mod history;
mod ingredients;
mod preferences;

pub use favorites::{FavoriteRecipes, SavedRecipe};
pub use history::{SearchHistory, SearchRecord};
pub use ingredients::{FrequentIngredients, IngredientCount};
pub use preferences::PreferencesStore;
