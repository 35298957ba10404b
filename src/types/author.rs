//! Author directory types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::handle::Handle;

/// One entry of the author directory.
///
/// The display title is not stored here: it is localized through the
/// translator under `events.authors.<handle>.title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Avatar reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Twitter handle.
    #[serde(default)]
    pub twitter: Option<String>,
    /// LinkedIn handle.
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl AuthorRecord {
    /// Record with an avatar and no social handles.
    pub fn with_image(image: impl Into<String>) -> Self {
        Self { image: Some(image.into()), ..Self::default() }
    }
}

/// Static snapshot of all known authors, keyed by handle.
///
/// Uses a BTreeMap so iteration (and anything hashed from it) is ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorDirectory {
    authors: BTreeMap<Handle, AuthorRecord>,
}

impl AuthorDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a directory from a JSON object of `handle -> record`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add or replace an author.
    pub fn insert(&mut self, handle: impl Into<Handle>, record: AuthorRecord) {
        self.authors.insert(handle.into(), record);
    }

    /// Look up an author.
    pub fn get(&self, handle: &str) -> Option<&AuthorRecord> {
        self.authors.get(handle)
    }

    /// Whether the handle is known.
    pub fn contains(&self, handle: &str) -> bool {
        self.authors.contains_key(handle)
    }

    /// Number of authors.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Iterate authors in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (&Handle, &AuthorRecord)> {
        self.authors.iter()
    }
}

impl<H: Into<Handle>> FromIterator<(H, AuthorRecord)> for AuthorDirectory {
    fn from_iter<I: IntoIterator<Item = (H, AuthorRecord)>>(iter: I) -> Self {
        Self {
            authors: iter.into_iter().map(|(h, r)| (h.into(), r)).collect(),
        }
    }
}

/// An author as shown on a page: directory record plus localized title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAuthor {
    /// Avatar reference (the site default when the record has none).
    pub image: String,
    /// Localized display title.
    pub title: String,
    /// Twitter handle.
    pub twitter: Option<String>,
    /// LinkedIn handle.
    pub linkedin: Option<String>,
    /// Directory handle; facet identity.
    pub handle: Handle,
}
