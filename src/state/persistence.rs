// Document store
// Reads and rewrites a whole JSON document on every call

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for persistence operations
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error on {path}: {source}")]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// JSON serialization/deserialization error
    #[error("JSON Error on {path}: {source}")]
    Json {
        /// Document path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// A JSON document on disk holding one whole collection
///
/// There is no caching: `load` reads the file in full and `save` rewrites it in
/// full. Callers serialize load-mutate-save sequences themselves.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    /// Document stored at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection
    ///
    /// # Returns
    /// * `Ok(T::default())` if the file does not exist
    /// * `Ok(T)` if the file parses
    /// * `Err(PersistenceError)` if it cannot be read or is not valid JSON for `T`
    pub fn load<T>(&self) -> Result<T, PersistenceError>
    where
        T: DeserializeOwned + Default,
    {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Document missing, using empty collection");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrite the document with `value`, indented by four spaces
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), PersistenceError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|source| PersistenceError::Json {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, buffer).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "Document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::User;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_save_and_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let document = JsonDocument::new(temp_file.path());

        let users = vec![
            User {
                id: 101,
                name: "Rahim".to_string(),
                department: "CSE".to_string(),
                score: 88.5,
            },
            User {
                id: 102,
                name: "Karim".to_string(),
                department: "EEE".to_string(),
                score: 91.0,
            },
        ];
        document.save(&users).unwrap();

        let loaded: Vec<User> = document.load().unwrap();
        assert_eq!(loaded, users);

        let raw = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(raw.contains("\n    {\n        \"id\": 101"));
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let document = JsonDocument::new(dir.path().join("missing.json"));

        let users: Vec<User> = document.load().unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[{\"id\": 1,").unwrap();
        let document = JsonDocument::new(temp_file.path());

        let result: Result<Vec<User>, _> = document.load();
        assert!(matches!(result, Err(PersistenceError::Json { .. })));
    }
}
