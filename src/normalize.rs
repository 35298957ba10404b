//! Raw record → view model normalization.

use tracing::debug;

use crate::catalog::CatalogError;
use crate::clock::EventClock;
use crate::config::SiteConfig;
use crate::i18n::Translator;
use crate::image::{ImageBuilder, ImageDescriptor, ImageRequest};
use crate::resolver::{AuthorResolver, ResolveError};
use crate::types::{
    EventViewModel, Presenters, RawEvent, RawSession, ResolvedAuthor, SessionFormat,
    SessionKind, SessionViewModel,
};

/// Normalizes sessions.
///
/// ## Panels
///
/// | Participants | Title | Image |
/// |--------------|-------|-------|
/// | exactly 1 | participant's title | participant's image |
/// | 0 or 2+ | "multiple participants" label | multi-participant image |
#[derive(Debug, Clone, Copy)]
pub struct SessionNormalizer<'a> {
    resolver: AuthorResolver<'a>,
    translator: &'a dyn Translator,
    images: &'a dyn ImageBuilder,
    config: &'a SiteConfig,
}

impl<'a> SessionNormalizer<'a> {
    /// Create a session normalizer.
    pub fn new(
        resolver: AuthorResolver<'a>,
        translator: &'a dyn Translator,
        images: &'a dyn ImageBuilder,
        config: &'a SiteConfig,
    ) -> Self {
        Self { resolver, translator, images, config }
    }

    /// Normalize one session for `locale`.
    ///
    /// Fails on the first handle missing from the author directory.
    pub fn normalize(&self, session: &RawSession, locale: &str) -> Result<SessionViewModel, ResolveError> {
        let (kind, title, image, presenters) = match &session.format {
            SessionFormat::Speaker { speaker } => {
                let speaker = self.resolver.resolve(speaker, locale)?;
                let alt = if speaker.title.is_empty() { &session.title } else { &speaker.title };
                let image = self.avatar(&speaker.image, alt);
                (SessionKind::Speaker, session.title.clone(), image, Presenters::Speaker(speaker))
            }
            SessionFormat::Panel { participants } => {
                let participants = participants
                    .iter()
                    .map(|handle| self.resolver.resolve(handle, locale))
                    .collect::<Result<Vec<_>, _>>()?;
                let (title, src) = self.panel_title_and_image(&participants, locale);
                let image = self.avatar(&src, &title);
                (SessionKind::Panel, title, image, Presenters::Panel(participants))
            }
        };

        Ok(SessionViewModel {
            title,
            description: session.description.clone(),
            kind,
            topics: session.topics.clone(),
            slides_url: session.slides_url.clone(),
            video_url: session.video_url.clone(),
            image,
            presenters,
        })
    }

    fn panel_title_and_image(&self, participants: &[ResolvedAuthor], locale: &str) -> (String, String) {
        match participants {
            [only] => (only.title.clone(), only.image.clone()),
            _ => (
                self.translator.translate(&self.config.multiple_participants_key, locale),
                self.config.multiple_participants_image.clone(),
            ),
        }
    }

    fn avatar(&self, src: &str, alt: &str) -> ImageDescriptor {
        self.images.build(
            ImageRequest::square(src, self.config.avatar_size, alt).with_class(&self.config.avatar_class),
        )
    }
}

/// Normalizes whole events.
#[derive(Debug, Clone, Copy)]
pub struct EventNormalizer<'a> {
    sessions: SessionNormalizer<'a>,
    clock: &'a dyn EventClock,
    images: &'a dyn ImageBuilder,
    config: &'a SiteConfig,
}

impl<'a> EventNormalizer<'a> {
    /// Create an event normalizer.
    pub fn new(
        sessions: SessionNormalizer<'a>,
        clock: &'a dyn EventClock,
        images: &'a dyn ImageBuilder,
        config: &'a SiteConfig,
    ) -> Self {
        Self { sessions, clock, images, config }
    }

    /// Normalize one event for `locale`.
    ///
    /// All-or-nothing: a single failing session fails the event.
    pub fn normalize(&self, event: &RawEvent, locale: &str) -> Result<EventViewModel, CatalogError> {
        let sessions = event
            .sessions
            .iter()
            .enumerate()
            .map(|(index, session)| {
                self.sessions
                    .normalize(session, locale)
                    .map_err(|source| CatalogError::Normalize {
                        event_id: event.id.clone(),
                        session: index,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let src = event
            .image
            .as_deref()
            .unwrap_or(self.config.event_placeholder_image.as_str());
        let image = self
            .images
            .build(ImageRequest::square(src, self.config.event_image_size, &event.title));

        let is_past_event = self.clock.is_past(event);
        debug!(event_id = %event.id, sessions = sessions.len(), is_past_event, "normalized event");

        Ok(EventViewModel {
            id: event.id.clone(),
            title: event.title.clone(),
            url: event.url.clone(),
            summary: event.summary.clone(),
            location: event.location.clone(),
            date: event.date,
            is_past_event,
            sessions,
            image,
        })
    }
}
