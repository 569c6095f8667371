//! Favorite Recipes Store
//!
//! Keeps full recipe records the user saved, with the save time, deduped
//! by recipe id.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Recipe;
use crate::storage::document::JsonDocument;

const FAVORITES_FILE: &str = "favorites.json";

/// One saved recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
}

// == Favorite Recipes ==
/// Best-effort store of saved recipes.
#[derive(Debug, Clone)]
pub struct FavoriteRecipes {
    doc: JsonDocument,
}

impl FavoriteRecipes {
    /// Opens the store in the platform data directory.
    pub fn open() -> Option<Self> {
        Some(Self {
            doc: JsonDocument::open(FAVORITES_FILE)?,
        })
    }

    /// Opens the store under a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            doc: JsonDocument::with_dir(dir, FAVORITES_FILE),
        }
    }

    /// Saves a recipe. Returns false if it was already saved.
    pub fn add(&self, recipe: Recipe) -> bool {
        let mut favorites: Vec<SavedRecipe> = self.doc.load_or_default();

        if favorites.iter().any(|f| f.recipe.id == recipe.id) {
            return false;
        }

        favorites.push(SavedRecipe {
            recipe,
            saved_at: Utc::now(),
        });
        self.doc.save(&favorites);
        true
    }

    /// Removes a recipe by id. Returns false if it was not saved.
    pub fn remove(&self, recipe_id: u64) -> bool {
        let mut favorites: Vec<SavedRecipe> = self.doc.load_or_default();
        let before = favorites.len();

        favorites.retain(|f| f.recipe.id != recipe_id);

        if favorites.len() == before {
            return false;
        }
        self.doc.save(&favorites);
        true
    }

    /// Whether the recipe is currently saved.
    pub fn contains(&self, recipe_id: u64) -> bool {
        self.list().iter().any(|f| f.recipe.id == recipe_id)
    }

    /// Returns all saved recipes in save order.
    pub fn list(&self) -> Vec<SavedRecipe> {
        self.doc.load_or_default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_recipe(id: u64) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {}", id),
            image: None,
            ready_in_minutes: 20,
            servings: 4,
            rating: 4.0,
            summary: String::new(),
            used_ingredients: vec![],
            missed_ingredients: vec![],
            source_url: None,
            nutrition: None,
        }
    }

    #[test]
    fn test_add_and_list() {
        let dir = TempDir::new().unwrap();
        let store = FavoriteRecipes::with_dir(dir.path().to_path_buf());

        assert!(store.add(sample_recipe(1)));
        assert!(store.add(sample_recipe(2)));

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].recipe.id, 1);
        assert!(store.contains(1));
    }

    #[test]
    fn test_add_is_deduplicated_by_id() {
        let dir = TempDir::new().unwrap();
        let store = FavoriteRecipes::with_dir(dir.path().to_path_buf());

        assert!(store.add(sample_recipe(1)));
        assert!(!store.add(sample_recipe(1)));

        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = FavoriteRecipes::with_dir(dir.path().to_path_buf());

        store.add(sample_recipe(1));

        assert!(store.remove(1));
        assert!(!store.remove(1));
        assert!(!store.contains(1));
    }
}
