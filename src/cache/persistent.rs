//! Persistent Cache Tier
//!
//! Durable, reload-surviving cache layer: a single JSON document on disk
//! holding the full key-to-entry mapping. Every write is a read-modify-write
//! of the whole document.
//!
//! The tier is advisory. Reads that fail (missing file, unreadable JSON)
//! degrade to an empty store; writes that fail are logged and dropped. A
//! write that exceeds the configured size budget triggers one recovery pass
//! that keeps only entries still inside the first half of their lifetime,
//! then retries once.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::CacheEntry;

/// File name of the serialized cache document.
const CACHE_FILE: &str = "recipe-cache.json";

// == Write Error ==
/// Failure modes for a document write. Never escapes the cache layer.
#[derive(Debug, Error)]
enum WriteError {
    #[error("document size {0} bytes exceeds quota")]
    QuotaExceeded(usize),

    #[error(transparent)]
    Io(#[from] io::Error),
}

// == Persistent Store ==
/// Disk-backed cache tier storing all entries in one JSON document.
#[derive(Debug, Clone)]
pub struct PersistentStore {
    /// Path of the cache document
    path: PathBuf,
    /// Size budget for the serialized document in bytes
    quota_bytes: usize,
}

impl PersistentStore {
    // == Constructors ==
    /// Creates a store in the platform cache directory
    /// (`~/.cache/recipe-finder/` on Linux).
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn open(quota_bytes: usize) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "recipe-finder")?;
        Some(Self {
            path: project_dirs.cache_dir().join(CACHE_FILE),
            quota_bytes,
        })
    }

    /// Creates a store rooted at a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf, quota_bytes: usize) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
            quota_bytes,
        }
    }

    // == Load ==
    /// Reads the full document. Any failure yields an empty mapping.
    pub fn load(&self) -> HashMap<String, CacheEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to read cache document: {}", err);
                }
                return HashMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(cache) => cache,
            Err(err) => {
                warn!("Cache document is corrupt, starting empty: {}", err);
                HashMap::new()
            }
        }
    }

    // == Save ==
    /// Serializes and writes the full document, enforcing the size budget.
    fn save(&self, cache: &HashMap<String, CacheEntry>) -> Result<(), WriteError> {
        let serialized = serde_json::to_string(cache)
            .map_err(|e| WriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        if serialized.len() > self.quota_bytes {
            return Err(WriteError::QuotaExceeded(serialized.len()));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    // == Insert ==
    /// Merges one entry into the document.
    ///
    /// On a quota overflow, runs the half-life recovery pass (drop every
    /// persisted entry past half its lifetime) and retries once. A second
    /// failure drops the write; the memory tier still holds the value.
    pub fn insert(&self, key: &str, entry: CacheEntry) {
        let mut cache = self.load();
        cache.insert(key.to_string(), entry.clone());

        match self.save(&cache) {
            Ok(()) => {}
            Err(WriteError::QuotaExceeded(size)) => {
                warn!(
                    "Cache document at {} bytes exceeds quota of {}, pruning stale half",
                    size, self.quota_bytes
                );
                cache.retain(|_, e| !e.past_half_life());
                cache.insert(key.to_string(), entry);

                if let Err(err) = self.save(&cache) {
                    warn!("Dropping persistent write for '{}': {}", key, err);
                }
            }
            Err(err) => {
                warn!("Failed to write cache document: {}", err);
            }
        }
    }

    // == Get ==
    /// Looks up one entry. Expired entries are returned as-is; validity is
    /// the store front's concern.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.load().remove(key)
    }

    // == Remove ==
    /// Deletes one entry from the document.
    pub fn remove(&self, key: &str) {
        let mut cache = self.load();
        if cache.remove(key).is_some() {
            if let Err(err) = self.save(&cache) {
                warn!("Failed to delete '{}' from cache document: {}", key, err);
            }
        }
    }

    // == Clear ==
    /// Removes the whole document.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("Failed to clear cache document: {}", err),
        }
    }

    // == Cleanup ==
    /// Removes every expired entry. Returns the number removed.
    pub fn cleanup(&self) -> usize {
        let mut cache = self.load();
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_expired());
        let removed = before - cache.len();

        if removed > 0 {
            if let Err(err) = self.save(&cache) {
                warn!("Failed to write cache document after cleanup: {}", err);
            } else {
                debug!("Persistent cleanup removed {} entries", removed);
            }
        }
        removed
    }

    // == Length ==
    /// Number of entries currently persisted.
    pub fn len(&self) -> usize {
        self.load().len()
    }

    // == Size ==
    /// Approximate serialized size of the document in bytes.
    pub fn size_bytes(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }
}
