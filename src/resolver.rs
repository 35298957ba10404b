//! Author resolution.
//!
//! The single validation point of the pipeline: every handle a session
//! references must exist in the author directory.

use tracing::warn;

use crate::config::SiteConfig;
use crate::i18n::Translator;
use crate::types::{AuthorDirectory, Handle, ResolvedAuthor};

/// Error type for author resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Handle is not in the author directory.
    #[error("Unknown author: {handle}")]
    UnknownAuthor {
        /// The missing handle.
        handle: Handle,
    },
}

/// Resolves handles against an explicit author directory.
#[derive(Clone, Copy)]
pub struct AuthorResolver<'a> {
    directory: &'a AuthorDirectory,
    translator: &'a dyn Translator,
    config: &'a SiteConfig,
}

impl<'a> AuthorResolver<'a> {
    /// Create a resolver over the given directory.
    pub fn new(
        directory: &'a AuthorDirectory,
        translator: &'a dyn Translator,
        config: &'a SiteConfig,
    ) -> Self {
        Self { directory, translator, config }
    }

    /// Resolve a handle to display data for `locale`.
    ///
    /// The title comes from the translator; its fallback behavior for a
    /// missing key is passed through untouched.
    pub fn resolve(&self, handle: &Handle, locale: &str) -> Result<ResolvedAuthor, ResolveError> {
        let record = self.directory.get(handle.as_str()).ok_or_else(|| {
            warn!(%handle, locale, "session references unknown author");
            ResolveError::UnknownAuthor { handle: handle.clone() }
        })?;

        Ok(ResolvedAuthor {
            image: record
                .image
                .clone()
                .unwrap_or_else(|| self.config.default_avatar.clone()),
            title: self
                .translator
                .translate(&self.config.author_title_key(handle), locale),
            twitter: record.twitter.clone(),
            linkedin: record.linkedin.clone(),
            handle: handle.clone(),
        })
    }
}

impl std::fmt::Debug for AuthorResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorResolver")
            .field("authors", &self.directory.len())
            .finish_non_exhaustive()
    }
}
