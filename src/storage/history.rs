//! Search History Store
//!
//! Remembers the last 20 searches, newest first.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SearchFilters;
use crate::storage::document::JsonDocument;

const HISTORY_FILE: &str = "search-history.json";

/// Only the most recent searches are kept.
const MAX_HISTORY: usize = 20;

/// One past search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub ingredients: Vec<String>,
    pub filters: SearchFilters,
    pub result_count: usize,
    pub searched_at: DateTime<Utc>,
}

// == Search History ==
/// Best-effort store of recent searches.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    doc: JsonDocument,
}

impl SearchHistory {
    /// Opens the store in the platform data directory.
    pub fn open() -> Option<Self> {
        Some(Self {
            doc: JsonDocument::open(HISTORY_FILE)?,
        })
    }

    /// Opens the store under a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            doc: JsonDocument::with_dir(dir, HISTORY_FILE),
        }
    }

    /// Prepends one search to the history, trimming to the cap.
    pub fn record(&self, ingredients: &[String], filters: &SearchFilters, result_count: usize) {
        let mut history: Vec<SearchRecord> = self.doc.load_or_default();

        history.insert(
            0,
            SearchRecord {
                ingredients: ingredients.to_vec(),
                filters: filters.clone(),
                result_count,
                searched_at: Utc::now(),
            },
        );
        history.truncate(MAX_HISTORY);

        self.doc.save(&history);
    }

    /// Returns past searches, newest first.
    pub fn list(&self) -> Vec<SearchRecord> {
        self.doc.load_or_default()
    }
}
