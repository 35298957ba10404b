//! Raw content records as supplied by the content store.
//!
//! These mirror the front-matter of event content files. They are immutable
//! inputs: the pipeline reads them and never writes back.

use serde::Deserialize;

use super::date::EventDate;
use super::handle::Handle;

/// Errors raised while turning a loosely-typed session record into a
/// [`RawSession`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawRecordError {
    /// A `speaker` session without a `speaker` handle.
    #[error("session {title:?} has type \"speaker\" but no speaker handle")]
    MissingSpeaker {
        /// Session title.
        title: String,
    },
    /// A panel session without a `participants` list.
    #[error("session {title:?} is a panel but has no participants list")]
    MissingParticipants {
        /// Session title.
        title: String,
    },
}

/// Who presents a session.
///
/// The content format uses a `type` discriminator: `"speaker"` selects a
/// single speaker, anything else (including no type at all) is a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFormat {
    /// Single-speaker talk.
    Speaker {
        /// Handle of the speaker.
        speaker: Handle,
    },
    /// Multi-participant panel.
    Panel {
        /// Participant handles, in presentation order.
        participants: Vec<Handle>,
    },
}

/// One session of a raw event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSessionRecord")]
pub struct RawSession {
    /// Session title.
    pub title: String,
    /// Session description.
    pub description: String,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Link to slides.
    pub slides_url: Option<String>,
    /// Link to a recording.
    pub video_url: Option<String>,
    /// Speaker or panel.
    pub format: SessionFormat,
}

impl RawSession {
    /// Create a single-speaker session.
    pub fn speaker(title: impl Into<String>, speaker: impl Into<Handle>) -> Self {
        Self::with_format(title, SessionFormat::Speaker { speaker: speaker.into() })
    }

    /// Create a panel session.
    pub fn panel<I, H>(title: impl Into<String>, participants: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<Handle>,
    {
        Self::with_format(
            title,
            SessionFormat::Panel {
                participants: participants.into_iter().map(Into::into).collect(),
            },
        )
    }

    fn with_format(title: impl Into<String>, format: SessionFormat) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            topics: Vec::new(),
            slides_url: None,
            video_url: None,
            format,
        }
    }

    /// Set the topic tags.
    pub fn with_topics<I, T>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Handles referenced by this session, in order.
    pub fn handles(&self) -> Vec<&Handle> {
        match &self.format {
            SessionFormat::Speaker { speaker } => vec![speaker],
            SessionFormat::Panel { participants } => participants.iter().collect(),
        }
    }
}

/// Wire shape of a session before the discriminator is checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSessionRecord {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    slides_url: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    speaker: Option<Handle>,
    #[serde(default)]
    participants: Option<Vec<Handle>>,
}

impl TryFrom<RawSessionRecord> for RawSession {
    type Error = RawRecordError;

    fn try_from(record: RawSessionRecord) -> Result<Self, Self::Error> {
        let format = match record.kind.as_deref() {
            Some("speaker") => SessionFormat::Speaker {
                speaker: record.speaker.ok_or_else(|| RawRecordError::MissingSpeaker {
                    title: record.title.clone(),
                })?,
            },
            _ => SessionFormat::Panel {
                participants: record.participants.ok_or_else(|| {
                    RawRecordError::MissingParticipants { title: record.title.clone() }
                })?,
            },
        };

        Ok(Self {
            title: record.title,
            description: record.description,
            topics: record.topics,
            slides_url: record.slides_url,
            video_url: record.video_url,
            format,
        })
    }
}

/// A raw event record.
///
/// `date` and `sessions` are required; a record missing either fails to
/// deserialize rather than being silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Content identifier (usually the file slug).
    pub id: String,
    /// Event title.
    pub title: String,
    /// External event page.
    #[serde(default)]
    pub url: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: String,
    /// Venue or city.
    pub location: String,
    /// Event date.
    pub date: EventDate,
    /// Cover image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Sessions in running order.
    pub sessions: Vec<RawSession>,
}

impl RawEvent {
    /// Create an event with no sessions and empty optional fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        date: EventDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            summary: String::new(),
            location: location.into(),
            date,
            image: None,
            sessions: Vec::new(),
        }
    }

    /// Append a session.
    pub fn with_session(mut self, session: RawSession) -> Self {
        self.sessions.push(session);
        self
    }
}
