//! Directory-backed content store.
//!
//! Layout: one JSON file per event under a locale directory.
//!
//! ```text
//! <root>/en/rustconf-2024.json
//! <root>/en/meetup-oslo.json
//! <root>/fr/meetup-lyon.json
//! ```
//!
//! Files are read in path order. A record without an `id` takes the file
//! stem as its id.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::types::RawEvent;
use super::ContentStore;

/// Error type for the JSON content store.
#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    /// Directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File is not a valid event record.
    #[error("invalid event record {path}: {source}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Content store reading `<root>/<locale>/*.json`.
#[derive(Debug, Clone)]
pub struct JsonContentStore {
    root: PathBuf,
}

impl JsonContentStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_event(path: &Path) -> Result<RawEvent, JsonStoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| JsonStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |source| JsonStoreError::Parse { path: path.to_path_buf(), source };

        let mut value: Value = serde_json::from_str(&text).map_err(parse_err)?;
        if let (Value::Object(map), Some(stem)) = (&mut value, path.file_stem()) {
            map.entry("id")
                .or_insert_with(|| Value::String(stem.to_string_lossy().into_owned()));
        }
        serde_json::from_value(value).map_err(parse_err)
    }
}

impl ContentStore for JsonContentStore {
    type Error = JsonStoreError;

    fn events_by_locale(&self, locale: &str) -> Result<Vec<RawEvent>, Self::Error> {
        let dir = self.root.join(locale);
        if !dir.is_dir() {
            debug!(locale, dir = %dir.display(), "no content directory for locale");
            return Ok(Vec::new());
        }

        let io_err = |source| JsonStoreError::Io { path: dir.clone(), source };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        debug!(locale, files = paths.len(), "loading event records");
        paths.iter().map(|p| Self::read_event(p)).collect()
    }
}
