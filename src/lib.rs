//! # event-catalog
//!
//! Deterministic normalization of event content for page rendering.
//!
//! The catalog answers three questions for a locale:
//!
//! > Which events are coming up? Which are over? What can a visitor filter by?
//!
//! ## Core Contract
//!
//! 1. Load raw event records for a locale from a content store
//! 2. Resolve every speaker and panel participant against the author directory
//! 3. Split events into current (earliest first) and past (latest first)
//! 4. Derive de-duplicated, sorted facets: locations, speakers, topics
//!
//! ## Architecture
//!
//! ```text
//! ContentStore → EventCatalog → EventNormalizer → SessionNormalizer → AuthorResolver
//!                     ↓                                                     ↓
//!              extract_facets                                        AuthorDirectory
//! ```
//!
//! ## Guarantees
//!
//! - Either every event resolves completely, or the query fails
//! - Same content + same clock → identical output
//! - Facet lists contain each value once, in locale collation order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod config;
pub mod canonical;
pub mod collation;
pub mod clock;
pub mod i18n;
pub mod image;
pub mod resolver;
pub mod normalize;
pub mod order;
pub mod facets;
pub mod catalog;

// Re-exports
pub use types::{
    Handle, EventDate, DateParseError,
    RawEvent, RawSession, SessionFormat, RawRecordError,
    AuthorRecord, AuthorDirectory, ResolvedAuthor,
    EventViewModel, SessionViewModel, SessionKind, Presenters,
};
pub use store::{ContentStore, InMemoryContentStore, JsonContentStore, JsonStoreError};
pub use config::{SiteConfig, ConfigError};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use clock::{EventClock, SystemClock, FixedClock};
pub use i18n::{Translator, MessageCatalog};
pub use image::{ImageBuilder, ImageRequest, ImageDescriptor, StaticImageBuilder, PrefixedImageBuilder};
pub use resolver::{AuthorResolver, ResolveError};
pub use normalize::{EventNormalizer, SessionNormalizer};
pub use order::{ascending_by_date, descending_by_date};
pub use facets::{extract_facets, EventFacets, SpeakerFacet, OrderedSet};
pub use catalog::{EventCatalog, CatalogError, CatalogPage, EventFilter, EventComparator};

/// Schema version of the serialized view models.
/// Increment on breaking changes to any output type.
pub const EVENT_CATALOG_SCHEMA_VERSION: &str = "1.0.0";
