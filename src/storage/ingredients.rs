//! Frequent Ingredients Store
//!
//! Counts how often each ingredient is searched, keeping the top 20 sorted
//! by use count. Feeds suggestion ranking in the composition root.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::document::JsonDocument;

const FREQUENT_FILE: &str = "frequent-ingredients.json";

/// Only the most-used ingredients are kept.
const MAX_TRACKED: usize = 20;

/// One ingredient with its use count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientCount {
    pub name: String,
    pub count: u32,
}

// == Frequent Ingredients ==
/// Best-effort store of ingredient use counts.
#[derive(Debug, Clone)]
pub struct FrequentIngredients {
    doc: JsonDocument,
}

impl FrequentIngredients {
    /// Opens the store in the platform data directory.
    pub fn open() -> Option<Self> {
        Some(Self {
            doc: JsonDocument::open(FREQUENT_FILE)?,
        })
    }

    /// Opens the store under a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            doc: JsonDocument::with_dir(dir, FREQUENT_FILE),
        }
    }

    /// Records one use of an ingredient.
    pub fn record(&self, name: &str) {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return;
        }

        let mut frequent: Vec<IngredientCount> = self.doc.load_or_default();

        match frequent.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.count += 1,
            None => frequent.push(IngredientCount { name, count: 1 }),
        }

        frequent.sort_by(|a, b| b.count.cmp(&a.count));
        frequent.truncate(MAX_TRACKED);

        self.doc.save(&frequent);
    }

    /// Returns the tracked ingredients, most used first.
    pub fn list(&self) -> Vec<IngredientCount> {
        self.doc.load_or_default()
    }
}
