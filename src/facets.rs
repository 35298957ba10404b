//! Facet extraction for filtering UI.
//!
//! Facets are computed from fully normalized events:
//!
//! - **locations**: every event location
//! - **topics**: every session topic
//! - **speakers**: every resolved speaker and panel participant
//!
//! Each list holds every distinct value exactly once and is sorted with
//! [`collation`](crate::collation) for the page locale.
//!
//! ## Determinism
//!
//! De-duplication walks events and sessions in list order and keeps the
//! first occurrence of each key, so the chosen speaker title never depends
//! on hash iteration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::canonical::canonical_hash_hex;
use crate::collation;
use crate::types::{EventViewModel, Handle};

/// Insertion-ordered set: first insert of a key wins, later ones are dropped.
#[derive(Debug, Clone)]
pub struct OrderedSet<K: Ord, V> {
    seen: BTreeSet<K>,
    values: Vec<V>,
}

impl<K: Ord, V> OrderedSet<K, V> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { seen: BTreeSet::new(), values: Vec::new() }
    }

    /// Insert `value` under `key` unless the key is already present.
    ///
    /// Returns whether the value was kept.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.seen.insert(key) {
            self.values.push(value);
            true
        } else {
            false
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in first-insertion order.
    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

impl<K: Ord, V> Default for OrderedSet<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of the speaker facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerFacet {
    /// Author handle (identity).
    pub handle: Handle,
    /// Resolved title of the first occurrence.
    pub title: String,
}

/// All facets of a locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFacets {
    /// Distinct event locations.
    pub locations: Vec<String>,
    /// Distinct speakers, sorted by title.
    pub speakers: Vec<SpeakerFacet>,
    /// Distinct session topics.
    pub topics: Vec<String>,
}

impl EventFacets {
    /// Deterministic fingerprint of the facet lists.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Whether all three facets are empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.speakers.is_empty() && self.topics.is_empty()
    }
}

/// Compute facets over normalized events, sorted for `locale`.
pub fn extract_facets(events: &[EventViewModel], locale: &str) -> EventFacets {
    let mut locations: OrderedSet<&str, String> = OrderedSet::new();
    let mut topics: OrderedSet<&str, String> = OrderedSet::new();
    let mut speakers: OrderedSet<&Handle, SpeakerFacet> = OrderedSet::new();

    for event in events {
        locations.insert(&event.location, event.location.clone());
        for session in &event.sessions {
            for topic in &session.topics {
                topics.insert(topic, topic.clone());
            }
            for author in session.presenters.authors() {
                speakers.insert(
                    &author.handle,
                    SpeakerFacet { handle: author.handle.clone(), title: author.title.clone() },
                );
            }
        }
    }

    let mut locations = locations.into_values();
    collation::sort_strings(&mut locations, locale);

    let mut topics = topics.into_values();
    collation::sort_strings(&mut topics, locale);

    let mut speakers = speakers.into_values();
    speakers.sort_by_cached_key(|s| {
        (collation::collation_key(&s.title, locale), s.title.clone(), s.handle.clone())
    });

    EventFacets { locations, speakers, topics }
}
