//! JSON document helper
//!
//! Small best-effort wrapper around one JSON file on disk. Profile stores
//! are advisory: a missing or corrupt file reads as the default value, and
//! a failed write is logged and forgotten.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

// == Json Document ==
/// One JSON file holding one serializable value.
#[derive(Debug, Clone)]
pub(crate) struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    /// Opens a document in the platform data directory
    /// (`~/.local/share/recipe-finder/` on Linux).
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn open(file_name: &str) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "recipe-finder")?;
        Some(Self {
            path: project_dirs.data_dir().join(file_name),
        })
    }

    /// Opens a document under a custom directory. Useful for tests.
    pub fn with_dir(dir: PathBuf, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
        }
    }

    /// Reads the value, falling back to the default on any failure.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> T {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {}", self.path.display(), err);
                }
                return T::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!("Ignoring corrupt {}: {}", self.path.display(), err);
            T::default()
        })
    }

    /// Writes the value, logging and discarding any failure.
    pub fn save<T: Serialize>(&self, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("Failed to serialize {}: {}", self.path.display(), err);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("Failed to create {}: {}", parent.display(), err);
                return;
            }
        }

        if let Err(err) = fs::write(&self.path, serialized) {
            warn!("Failed to write {}: {}", self.path.display(), err);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        names: Vec<String>,
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let doc = JsonDocument::with_dir(dir.path().to_path_buf(), "sample.json");

        let value: Sample = doc.load_or_default();
        assert_eq!(value, Sample::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let doc = JsonDocument::with_dir(dir.path().to_path_buf(), "sample.json");

        let value = Sample {
            names: vec!["basil".to_string()],
        };
        doc.save(&value);

        assert_eq!(doc.load_or_default::<Sample>(), value);
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let doc = JsonDocument::with_dir(dir.path().to_path_buf(), "sample.json");

        fs::write(dir.path().join("sample.json"), "][").unwrap();

        assert_eq!(doc.load_or_default::<Sample>(), Sample::default());
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let doc = JsonDocument::with_dir(nested.clone(), "sample.json");

        doc.save(&Sample::default());

        assert!(nested.join("sample.json").exists());
    }
}
