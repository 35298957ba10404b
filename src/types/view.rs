//! Render-ready view models.
//!
//! Built fresh on every query and never mutated afterwards.

use serde::Serialize;

use super::author::ResolvedAuthor;
use super::date::EventDate;
use crate::image::ImageDescriptor;

/// Kind of a normalized session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Single-speaker talk.
    Speaker,
    /// Multi-participant panel.
    Panel,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Speaker => write!(f, "speaker"),
            Self::Panel => write!(f, "panel"),
        }
    }
}

/// Resolved presenters of a session.
///
/// Serializes as a `speaker` object or a `participants` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Presenters {
    /// The single speaker of a talk.
    #[serde(rename = "speaker")]
    Speaker(ResolvedAuthor),
    /// Panel participants in presentation order.
    #[serde(rename = "participants")]
    Panel(Vec<ResolvedAuthor>),
}

impl Presenters {
    /// All resolved authors, in order.
    pub fn authors(&self) -> &[ResolvedAuthor] {
        match self {
            Self::Speaker(author) => std::slice::from_ref(author),
            Self::Panel(authors) => authors,
        }
    }
}

/// A normalized session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewModel {
    /// Display title (panel titles are derived from participants).
    pub title: String,
    /// Session description.
    pub description: String,
    /// Speaker or panel.
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Link to slides.
    pub slides_url: Option<String>,
    /// Link to a recording.
    pub video_url: Option<String>,
    /// Avatar image.
    pub image: ImageDescriptor,
    /// Resolved speaker or participants.
    #[serde(flatten)]
    pub presenters: Presenters,
}

/// A normalized event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventViewModel {
    /// Content identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// External event page.
    #[serde(rename = "externalUrl")]
    pub url: Option<String>,
    /// Short summary.
    pub summary: String,
    /// Venue or city.
    pub location: String,
    /// Event date.
    pub date: EventDate,
    /// Whether the event was past at query time.
    pub is_past_event: bool,
    /// Normalized sessions, one per raw session.
    pub sessions: Vec<SessionViewModel>,
    /// Cover image.
    pub image: ImageDescriptor,
}
