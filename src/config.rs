//! Site configuration.
//!
//! Every constant the pipeline bakes into view models lives here: fallback
//! image references, image dimensions, the avatar style class and the
//! message keys used for localized labels.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canonical::canonical_hash_hex;
use crate::types::Handle;

/// Default avatar for authors without an image.
pub const DEFAULT_AVATAR: &str = "/images/avatar-default.png";
/// Image shown for panels with more than one participant.
pub const MULTIPLE_PARTICIPANTS_IMAGE: &str = "/images/avatar-multiple.png";
/// Cover image for events without one.
pub const EVENT_PLACEHOLDER_IMAGE: &str = "/images/event-placeholder.png";

/// Errors loading or validating a [`SiteConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Config is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Site-wide constants used while building view models.
///
/// All fields have defaults, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Avatar for authors whose record has no image.
    pub default_avatar: String,
    /// Image for panels with zero or several participants.
    pub multiple_participants_image: String,
    /// Cover image for events without one.
    pub event_placeholder_image: String,
    /// Edge length of event cover images.
    pub event_image_size: u32,
    /// Edge length of session avatars.
    pub avatar_size: u32,
    /// Style class applied to session avatars.
    pub avatar_class: String,
    /// Message key of the "multiple participants" label.
    pub multiple_participants_key: String,
    /// Prefix of author title keys (`<prefix>.<handle>.title`).
    pub author_key_prefix: String,
}

impl SiteConfig {
    /// Parse a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject configs that would produce broken images or labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_image_size == 0 || self.avatar_size == 0 {
            return Err(ConfigError::Invalid("image sizes must be non-zero".into()));
        }
        let required = [
            ("defaultAvatar", &self.default_avatar),
            ("multipleParticipantsImage", &self.multiple_participants_image),
            ("eventPlaceholderImage", &self.event_placeholder_image),
            ("multipleParticipantsKey", &self.multiple_participants_key),
            ("authorKeyPrefix", &self.author_key_prefix),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Message key of an author's display title.
    pub fn author_title_key(&self, handle: &Handle) -> String {
        format!("{}.{}.title", self.author_key_prefix, handle)
    }

    /// Deterministic fingerprint of the config, for build provenance.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_avatar: DEFAULT_AVATAR.to_string(),
            multiple_participants_image: MULTIPLE_PARTICIPANTS_IMAGE.to_string(),
            event_placeholder_image: EVENT_PLACEHOLDER_IMAGE.to_string(),
            event_image_size: 400,
            avatar_size: 40,
            avatar_class: "rounded-full".to_string(),
            multiple_participants_key: "events.multipleParticipants".to_string(),
            author_key_prefix: "events.authors".to_string(),
        }
    }
}
