//! Event collection pipeline.
//!
//! ```text
//! ContentStore ─► filter(raw) ─► EventNormalizer ─► sort(view) ─► Vec<EventViewModel>
//!                                     │
//!                     SessionNormalizer ─► AuthorResolver ─► AuthorDirectory
//! ```
//!
//! Every call re-reads the store and re-derives its output. Nothing is
//! cached, so a catalog can be shared across threads building different
//! locales.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::canonical::canonical_hash_hex;
use crate::clock::{EventClock, SystemClock};
use crate::config::SiteConfig;
use crate::facets::{extract_facets, EventFacets};
use crate::i18n::Translator;
use crate::image::{ImageBuilder, StaticImageBuilder};
use crate::normalize::{EventNormalizer, SessionNormalizer};
use crate::order::{ascending_by_date, descending_by_date};
use crate::resolver::{AuthorResolver, ResolveError};
use crate::store::ContentStore;
use crate::types::{AuthorDirectory, EventViewModel, Handle, RawEvent};

/// Error type for catalog queries.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Content store failed.
    #[error("Store error: {0}")]
    Store(String),
    /// A session of an event could not be normalized.
    #[error("Failed to normalize event {event_id} (session {session}): {source}")]
    Normalize {
        /// Id of the failing event.
        event_id: String,
        /// Index of the failing session within the event.
        session: usize,
        /// Root cause.
        #[source]
        source: ResolveError,
    },
}

impl CatalogError {
    /// Create a store error from any error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }

    /// The unknown author handle behind this error, if that is the cause.
    pub fn unknown_handle(&self) -> Option<&Handle> {
        match self {
            Self::Normalize { source: ResolveError::UnknownAuthor { handle }, .. } => Some(handle),
            Self::Store(_) => None,
        }
    }
}

/// Predicate over raw events, applied before normalization.
pub type EventFilter<'f> = &'f dyn Fn(&RawEvent) -> bool;

/// Ordering over normalized events.
pub type EventComparator<'f> = &'f dyn Fn(&EventViewModel, &EventViewModel) -> Ordering;

/// Everything a page needs for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    /// Output schema version.
    pub schema_version: String,
    /// Locale the page was built for.
    pub locale: String,
    /// Upcoming events, earliest first.
    pub current: Vec<EventViewModel>,
    /// Past events, latest first.
    pub past: Vec<EventViewModel>,
    /// Filter facets over all events.
    pub facets: EventFacets,
}

impl CatalogPage {
    /// Deterministic fingerprint of the page contents.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}

/// Event catalog over a content store.
///
/// Collaborators are explicit: the author directory, translator, clock and
/// image builder are all injected, with [`SystemClock`] and
/// [`StaticImageBuilder`] as defaults.
pub struct EventCatalog<S: ContentStore> {
    store: Arc<S>,
    authors: Arc<AuthorDirectory>,
    translator: Arc<dyn Translator>,
    clock: Arc<dyn EventClock>,
    images: Arc<dyn ImageBuilder>,
    config: SiteConfig,
}

impl<S: ContentStore> EventCatalog<S> {
    /// Create a catalog with the system clock, verbatim images and default config.
    pub fn new(
        store: Arc<S>,
        authors: Arc<AuthorDirectory>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            store,
            authors,
            translator,
            clock: Arc::new(SystemClock),
            images: Arc::new(StaticImageBuilder),
            config: SiteConfig::default(),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl EventClock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the image builder.
    pub fn with_image_builder(mut self, images: impl ImageBuilder + 'static) -> Self {
        self.images = Arc::new(images);
        self
    }

    /// Replace the site configuration.
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the author directory.
    pub fn authors(&self) -> &AuthorDirectory {
        &self.authors
    }

    /// Build the normalizer chain borrowing this catalog's collaborators.
    pub fn normalizer(&self) -> EventNormalizer<'_> {
        let resolver = AuthorResolver::new(&self.authors, self.translator.as_ref(), &self.config);
        let sessions = SessionNormalizer::new(
            resolver,
            self.translator.as_ref(),
            self.images.as_ref(),
            &self.config,
        );
        EventNormalizer::new(sessions, self.clock.as_ref(), self.images.as_ref(), &self.config)
    }

    /// Query, filter, normalize and optionally sort the events of `locale`.
    ///
    /// The filter sees raw records. Without a comparator the store order is
    /// kept. Any failing event fails the whole call.
    pub fn query_events(
        &self,
        locale: &str,
        filter: Option<EventFilter<'_>>,
        compare: Option<EventComparator<'_>>,
    ) -> Result<Vec<EventViewModel>, CatalogError> {
        let raw = self
            .store
            .events_by_locale(locale)
            .map_err(CatalogError::from_store)?;
        let fetched = raw.len();

        let normalizer = self.normalizer();
        let mut events = raw
            .iter()
            .filter(|event| filter.map_or(true, |keep| keep(*event)))
            .map(|event| normalizer.normalize(event, locale))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(compare) = compare {
            events.sort_by(|a, b| compare(a, b));
        }

        info!(locale, fetched, returned = events.len(), "queried events");
        Ok(events)
    }

    /// Upcoming events, earliest first.
    #[instrument(skip(self))]
    pub fn current_events(&self, locale: &str) -> Result<Vec<EventViewModel>, CatalogError> {
        let clock = self.clock.as_ref();
        self.query_events(locale, Some(&|event: &RawEvent| !clock.is_past(event)), Some(&ascending_by_date))
    }

    /// Past events, latest first.
    #[instrument(skip(self))]
    pub fn past_events(&self, locale: &str) -> Result<Vec<EventViewModel>, CatalogError> {
        let clock = self.clock.as_ref();
        self.query_events(locale, Some(&|event: &RawEvent| clock.is_past(event)), Some(&descending_by_date))
    }

    /// Locations, speakers and topics across every event of `locale`.
    #[instrument(skip(self))]
    pub fn event_facets(&self, locale: &str) -> Result<EventFacets, CatalogError> {
        let events = self.query_events(locale, None, None)?;
        Ok(extract_facets(&events, locale))
    }

    /// Current events, past events and facets in one bundle.
    #[instrument(skip(self))]
    pub fn page(&self, locale: &str) -> Result<CatalogPage, CatalogError> {
        Ok(CatalogPage {
            schema_version: crate::EVENT_CATALOG_SCHEMA_VERSION.to_string(),
            locale: locale.to_string(),
            current: self.current_events(locale)?,
            past: self.past_events(locale)?,
            facets: self.event_facets(locale)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::i18n::MessageCatalog;
    use crate::store::InMemoryContentStore;
    use crate::types::{AuthorRecord, EventDate, RawSession};

    fn date(s: &str) -> EventDate {
        EventDate::parse(s).unwrap()
    }

    fn authors() -> Arc<AuthorDirectory> {
        let mut dir = AuthorDirectory::new();
        for handle in ["alice", "bob", "carol"] {
            dir.insert(handle, AuthorRecord::with_image(format!("/img/{handle}.png")));
        }
        Arc::new(dir)
    }

    fn messages() -> Arc<MessageCatalog> {
        Arc::new(
            MessageCatalog::new()
                .with_message("en", "events.authors.alice.title", "Alice")
                .with_message("en", "events.authors.bob.title", "Bob")
                .with_message("en", "events.authors.carol.title", "Carol")
                .with_message("en", "events.multipleParticipants", "Multiple participants"),
        )
    }

    fn catalog(store: InMemoryContentStore) -> EventCatalog<InMemoryContentStore> {
        EventCatalog::new(Arc::new(store), authors(), messages())
            .with_clock(FixedClock::at_date(date("2023-01-01")))
    }

    fn ids(events: &[EventViewModel]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    fn store_of(events: Vec<RawEvent>) -> InMemoryContentStore {
        events
            .into_iter()
            .fold(InMemoryContentStore::new(), |store, e| store.with_event("en", e))
    }

    #[test]
    fn test_query_without_filter_keeps_store_order() {
        let store = store_of(vec![
            RawEvent::new("b", "B", "Oslo", date("2099-01-01")),
            RawEvent::new("a", "A", "Oslo", date("2020-01-01")),
        ]);
        let events = catalog(store).query_events("en", None, None).unwrap();
        assert_eq!(ids(&events), vec!["b", "a"]);
    }

    #[test]
    fn test_query_filter_sees_raw_records() {
        let store = store_of(vec![
            RawEvent::new("a", "A", "Oslo", date("2020-01-01")),
            RawEvent::new("b", "B", "Bergen", date("2021-01-01")),
        ]);
        let only_bergen = |e: &RawEvent| e.location == "Bergen";
        let events = catalog(store).query_events("en", Some(&only_bergen), None).unwrap();
        assert_eq!(ids(&events), vec!["b"]);
    }

    #[test]
    fn test_current_and_past_partition() {
        let store = store_of(vec![
            RawEvent::new("old", "Old", "Oslo", date("2020-01-01")),
            RawEvent::new("far", "Far", "Oslo", date("2099-01-01")),
            RawEvent::new("older", "Older", "Oslo", date("2019-06-01")),
            RawEvent::new("near", "Near", "Oslo", date("2024-01-01")),
            RawEvent::new("now", "Now", "Oslo", date("2023-01-01")),
        ]);
        let catalog = catalog(store);

        let current = catalog.current_events("en").unwrap();
        let past = catalog.past_events("en").unwrap();
        assert_eq!(ids(&current), vec!["near", "far"]);
        assert_eq!(ids(&past), vec!["now", "old", "older"]);
        assert!(current.iter().all(|e| !e.is_past_event));
        assert!(past.iter().all(|e| e.is_past_event));
    }

    #[test]
    fn test_unknown_author_fails_whole_query() {
        let store = store_of(vec![
            RawEvent::new("ok", "Ok", "Oslo", date("2020-01-01"))
                .with_session(RawSession::speaker("Talk", "alice")),
            RawEvent::new("bad", "Bad", "Oslo", date("2020-02-01"))
                .with_session(RawSession::speaker("Fine", "bob"))
                .with_session(RawSession::panel("Haunted", ["carol", "ghost"])),
        ]);
        let err = catalog(store).query_events("en", None, None).unwrap_err();

        assert_eq!(err.unknown_handle().map(Handle::as_str), Some("ghost"));
        match err {
            CatalogError::Normalize { event_id, session, .. } => {
                assert_eq!(event_id, "bad");
                assert_eq!(session, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_excludes_bad_event_before_normalization() {
        let store = store_of(vec![
            RawEvent::new("bad", "Bad", "Oslo", date("2099-01-01"))
                .with_session(RawSession::speaker("Talk", "ghost")),
            RawEvent::new("ok", "Ok", "Oslo", date("2020-01-01"))
                .with_session(RawSession::speaker("Talk", "alice")),
        ]);
        let catalog = catalog(store);
        assert_eq!(ids(&catalog.past_events("en").unwrap()), vec!["ok"]);
        assert!(catalog.current_events("en").is_err());
    }

    #[test]
    fn test_page_bundles_all_views() {
        let store = store_of(vec![
            RawEvent::new("1", "One", "Oslo", date("2020-01-01"))
                .with_session(RawSession::speaker("Talk", "alice").with_topics(["rust"])),
            RawEvent::new("2", "Two", "Bergen", date("2099-01-01"))
                .with_session(RawSession::panel("Panel", ["bob", "carol"]).with_topics(["wasm"])),
        ]);
        let catalog = catalog(store);
        let page = catalog.page("en").unwrap();

        assert_eq!(page.locale, "en");
        assert_eq!(ids(&page.current), vec!["2"]);
        assert_eq!(ids(&page.past), vec!["1"]);
        assert_eq!(page.facets.locations, vec!["Bergen", "Oslo"]);
        assert_eq!(page.fingerprint(), catalog.page("en").unwrap().fingerprint());
    }

    #[test]
    fn test_unknown_locale_is_empty() {
        let catalog = catalog(InMemoryContentStore::new());
        assert!(catalog.current_events("xx").unwrap().is_empty());
        assert!(catalog.event_facets("xx").unwrap().is_empty());
    }
}
