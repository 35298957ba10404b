//! Content store backends.
//!
//! The pipeline never loads content itself. It asks a [`ContentStore`] for
//! every raw event under a locale and works on that snapshot.

pub mod memory;
pub mod json;

use crate::types::RawEvent;

/// Source of raw event records.
///
/// Implementations must return records in a stable order: two calls over
/// unchanged content yield the same sequence.
pub trait ContentStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All raw events scoped to `locale`. An unknown locale yields no events.
    fn events_by_locale(&self, locale: &str) -> Result<Vec<RawEvent>, Self::Error>;
}

pub use memory::InMemoryContentStore;
pub use json::{JsonContentStore, JsonStoreError};
