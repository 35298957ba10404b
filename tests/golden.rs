//! Golden tests for the event catalog.
//!
//! These tests pin the observable output of the pipeline on small,
//! hand-written catalogs.

use std::sync::Arc;
use event_catalog::{
    AuthorDirectory, AuthorRecord, CatalogError, EventCatalog, EventDate, FixedClock,
    InMemoryContentStore, MessageCatalog, Presenters, RawEvent, RawSession, SessionKind,
    SiteConfig,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn date(s: &str) -> EventDate {
    EventDate::parse(s).unwrap()
}

fn authors() -> Arc<AuthorDirectory> {
    let mut dir = AuthorDirectory::new();
    dir.insert(
        "alice",
        AuthorRecord {
            image: Some("/authors/alice.jpg".into()),
            twitter: Some("alice_rs".into()),
            linkedin: Some("alice-l".into()),
        },
    );
    dir.insert("bob", AuthorRecord::with_image("/authors/bob.jpg"));
    dir.insert("carol", AuthorRecord::default());
    dir.insert("dan", AuthorRecord::with_image("/authors/dan.jpg"));
    Arc::new(dir)
}

fn messages() -> Arc<MessageCatalog> {
    Arc::new(
        MessageCatalog::new()
            .with_default_locale("en")
            // Titles chosen so title order differs from handle order.
            .with_message("en", "events.authors.alice.title", "Zoe Alice")
            .with_message("en", "events.authors.bob.title", "Bob Marley")
            .with_message("en", "events.authors.carol.title", "Carol King")
            .with_message("en", "events.authors.dan.title", "Dan Abramov")
            .with_message("en", "events.multipleParticipants", "Multiple participants")
            .with_message("fr", "events.multipleParticipants", "Plusieurs intervenants"),
    )
}

/// One past talk and one future panel.
fn scenario_store() -> InMemoryContentStore {
    InMemoryContentStore::new()
        .with_event(
            "en",
            RawEvent::new("1", "Past Talk Night", "Oslo", date("2020-01-01"))
                .with_session(RawSession::speaker("Ownership", "alice").with_topics(["rust"])),
        )
        .with_event(
            "en",
            RawEvent::new("2", "Future Panel Day", "Bergen", date("2099-01-01"))
                .with_session(RawSession::panel("Panel", ["bob", "carol"]).with_topics(["async", "rust"])),
        )
}

fn catalog(store: InMemoryContentStore) -> EventCatalog<InMemoryContentStore> {
    EventCatalog::new(Arc::new(store), authors(), messages())
        .with_clock(FixedClock::at_date(date("2023-01-01")))
}

fn ids(events: &[event_catalog::EventViewModel]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// SCENARIO TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_scenario_past_and_current() {
    let catalog = catalog(scenario_store());

    let past = catalog.past_events("en").unwrap();
    let current = catalog.current_events("en").unwrap();

    assert_eq!(ids(&past), vec!["1"]);
    assert_eq!(ids(&current), vec!["2"]);
    assert!(past[0].is_past_event);
    assert!(!current[0].is_past_event);
}

#[test]
fn test_scenario_speaker_facet_sorted_by_title() {
    let facets = catalog(scenario_store()).event_facets("en").unwrap();

    let speakers: Vec<_> = facets
        .speakers
        .iter()
        .map(|s| (s.handle.as_str(), s.title.as_str()))
        .collect();
    assert_eq!(
        speakers,
        vec![("bob", "Bob Marley"), ("carol", "Carol King"), ("alice", "Zoe Alice")]
    );
    assert_eq!(facets.locations, vec!["Bergen", "Oslo"]);
    assert_eq!(facets.topics, vec!["async", "rust"]);
}

#[test]
fn test_scenario_view_model_contents() {
    let current = catalog(scenario_store()).current_events("en").unwrap();
    let event = &current[0];

    assert_eq!(event.title, "Future Panel Day");
    assert_eq!(event.image.src, SiteConfig::default().event_placeholder_image);
    assert_eq!(event.image.alt, "Future Panel Day");

    let panel = &event.sessions[0];
    assert_eq!(panel.kind, SessionKind::Panel);
    assert_eq!(panel.title, "Multiple participants");
    match &panel.presenters {
        Presenters::Panel(participants) => {
            assert_eq!(participants.len(), 2);
            assert_eq!(participants[0].image, "/authors/bob.jpg");
            // carol has no image in the directory
            assert_eq!(participants[1].image, SiteConfig::default().default_avatar);
        }
        other => panic!("expected panel, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PANEL TITLE RULE
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_panel_title_one_vs_three_participants() {
    let store = InMemoryContentStore::new()
        .with_event(
            "en",
            RawEvent::new("solo", "Solo", "Oslo", date("2021-03-01"))
                .with_session(RawSession::panel("Fireside", ["dan"])),
        )
        .with_event(
            "en",
            RawEvent::new("trio", "Trio", "Oslo", date("2021-04-01"))
                .with_session(RawSession::panel("Roundtable", ["alice", "bob", "carol"])),
        );
    let events = catalog(store).query_events("en", None, None).unwrap();

    assert_eq!(events[0].sessions[0].title, "Dan Abramov");
    assert_eq!(events[0].sessions[0].image.src, "/authors/dan.jpg");
    assert_eq!(events[1].sessions[0].title, "Multiple participants");
    assert_eq!(events[1].sessions[0].image.src, SiteConfig::default().multiple_participants_image);
}

#[test]
fn test_multi_label_is_localized() {
    let store = InMemoryContentStore::new().with_event(
        "fr",
        RawEvent::new("p", "Table ronde", "Lyon", date("2021-04-01"))
            .with_session(RawSession::panel("Table ronde", ["alice", "bob"])),
    );
    let events = catalog(store).query_events("fr", None, None).unwrap();

    assert_eq!(events[0].sessions[0].title, "Plusieurs intervenants");
    // Author titles fall back to the default locale.
    assert_eq!(events[0].sessions[0].presenters.authors()[0].title, "Zoe Alice");
}

// ─────────────────────────────────────────────────────────────────────────────
// FAILURE TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ghost_author_fails_entire_query() {
    let store = scenario_store().with_event(
        "en",
        RawEvent::new("3", "Haunted", "Oslo", date("2021-01-01"))
            .with_session(RawSession::speaker("Boo", "ghost")),
    );
    let catalog = catalog(store);

    let err = catalog.query_events("en", None, None).unwrap_err();
    assert!(matches!(err, CatalogError::Normalize { ref event_id, .. } if event_id == "3"));
    assert_eq!(err.unknown_handle().map(|h| h.as_str()), Some("ghost"));
    assert!(err.to_string().contains("Unknown author: ghost"));

    // Facets and the past view both include event 3, so both fail.
    assert!(catalog.event_facets("en").is_err());
    assert!(catalog.past_events("en").is_err());
    assert!(catalog.page("en").is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_same_content_same_fingerprint_100_runs() {
    let catalog = catalog(scenario_store());

    let first = catalog.page("en").unwrap().fingerprint();
    for i in 1..100 {
        assert_eq!(
            first,
            catalog.page("en").unwrap().fingerprint(),
            "Page fingerprint must be deterministic (run {} differs from run 0)",
            i
        );
    }
}

#[test]
fn test_clock_change_changes_fingerprint() {
    let early = EventCatalog::new(Arc::new(scenario_store()), authors(), messages())
        .with_clock(FixedClock::at_date(date("2010-01-01")));
    let late = catalog(scenario_store());

    assert_ne!(
        early.page("en").unwrap().fingerprint(),
        late.page("en").unwrap().fingerprint()
    );
    assert_eq!(
        early.event_facets("en").unwrap().fingerprint(),
        late.event_facets("en").unwrap().fingerprint(),
        "facets do not depend on the clock"
    );
}

#[test]
fn test_shared_catalog_across_threads() {
    let catalog = Arc::new(catalog(
        scenario_store().with_event(
            "fr",
            RawEvent::new("fr-1", "Soirée", "Lyon", date("2022-06-01"))
                .with_session(RawSession::speaker("Traits", "bob")),
        ),
    ));

    let handles: Vec<_> = ["en", "fr"]
        .into_iter()
        .map(|locale| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || catalog.page(locale).unwrap())
        })
        .collect();
    let pages: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(pages[0].past.len() + pages[0].current.len(), 2);
    assert_eq!(ids(&pages[1].past), vec!["fr-1"]);
}

#[test]
fn test_page_json_shape() {
    let page = catalog(scenario_store()).page("en").unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["schema_version"], event_catalog::EVENT_CATALOG_SCHEMA_VERSION);
    assert_eq!(json["past"][0]["isPastEvent"], true);
    assert_eq!(json["past"][0]["date"], "2020-01-01T00:00:00Z");
    assert_eq!(json["past"][0]["sessions"][0]["speaker"]["twitter"], "alice_rs");
    assert_eq!(json["current"][0]["sessions"][0]["type"], "panel");
    assert_eq!(json["facets"]["speakers"][0]["handle"], "bob");
}
