//! In-memory content store.

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::types::RawEvent;
use super::ContentStore;

/// In-memory content store, mainly for tests and pre-materialized content.
///
/// Events are kept per locale in insertion order, which is the order
/// `events_by_locale` returns them in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    events: BTreeMap<String, Vec<RawEvent>>,
}

impl InMemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event under a locale.
    pub fn add_event(&mut self, locale: impl Into<String>, event: RawEvent) {
        self.events.entry(locale.into()).or_default().push(event);
    }

    /// Builder-style [`add_event`](Self::add_event).
    pub fn with_event(mut self, locale: &str, event: RawEvent) -> Self {
        self.add_event(locale, event);
        self
    }

    /// Locales with at least one event, sorted.
    pub fn locales(&self) -> Vec<&str> {
        self.events.keys().map(String::as_str).collect()
    }

    /// Number of events under a locale.
    pub fn num_events(&self, locale: &str) -> usize {
        self.events.get(locale).map_or(0, Vec::len)
    }
}

impl ContentStore for InMemoryContentStore {
    type Error = Infallible;

    fn events_by_locale(&self, locale: &str) -> Result<Vec<RawEvent>, Self::Error> {
        Ok(self.events.get(locale).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventDate;

    fn make_event(id: &str) -> RawEvent {
        RawEvent::new(id, id.to_uppercase(), "Lyon", EventDate::from_ymd(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_events_scoped_by_locale() {
        let store = InMemoryContentStore::new()
            .with_event("en", make_event("a"))
            .with_event("fr", make_event("b"))
            .with_event("en", make_event("c"));

        let en = store.events_by_locale("en").unwrap();
        let ids: Vec<_> = en.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(store.num_events("fr"), 1);
        assert_eq!(store.locales(), vec!["en", "fr"]);
    }

    #[test]
    fn test_unknown_locale_is_empty() {
        let store = InMemoryContentStore::new().with_event("en", make_event("a"));
        assert!(store.events_by_locale("de").unwrap().is_empty());
    }
}
