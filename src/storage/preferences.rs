//! Filter Preferences Store
//!
//! Persists the user's last filter selection so a new session starts where
//! the previous one left off. Preferences older than 30 days are ignored.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SearchFilters;
use crate::storage::document::JsonDocument;

const PREFERENCES_FILE: &str = "preferences.json";

/// Saved preferences are considered stale after this many days.
const MAX_AGE_DAYS: i64 = 30;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedPreferences {
    filters: SearchFilters,
    saved_at: Option<DateTime<Utc>>,
}

// == Preferences Store ==
/// Best-effort store for the user's filter selection.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    doc: JsonDocument,
}

impl PreferencesStore {
    /// Opens the store in the platform data directory.
    pub fn open() -> Option<Self> {
        Some(Self {
            doc: JsonDocument::open(PREFERENCES_FILE)?,
        })
    }

    /// Opens the store under a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            doc: JsonDocument::with_dir(dir, PREFERENCES_FILE),
        }
    }

    /// Saves the current filter selection with a timestamp.
    pub fn save(&self, filters: &SearchFilters) {
        self.doc.save(&SavedPreferences {
            filters: filters.clone(),
            saved_at: Some(Utc::now()),
        });
    }

    /// Loads the saved filters, unless absent or older than 30 days.
    pub fn load(&self) -> Option<SearchFilters> {
        let saved: SavedPreferences = self.doc.load_or_default();
        let saved_at = saved.saved_at?;

        if Utc::now() - saved_at > Duration::days(MAX_AGE_DAYS) {
            return None;
        }
        Some(saved.filters)
    }
}
