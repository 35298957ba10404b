//! Localization.
//!
//! The pipeline only needs `translate(key, locale) -> String`. Whatever the
//! translator does on a missing key is its own business; callers never see
//! a failure.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// String lookup service.
pub trait Translator: Send + Sync {
    /// Translate `key` for `locale`.
    fn translate(&self, key: &str, locale: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn translate(&self, key: &str, locale: &str) -> String {
        self(key, locale)
    }
}

/// In-memory message catalog.
///
/// Lookup order: requested locale, then the default locale, then the key
/// itself.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<String, BTreeMap<String, String>>,
    default_locale: Option<String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Add one message.
    pub fn insert(&mut self, locale: impl Into<String>, key: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(locale.into())
            .or_default()
            .insert(key.into(), message.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_message(mut self, locale: &str, key: &str, message: &str) -> Self {
        self.insert(locale, key, message);
        self
    }

    /// Load a catalog from JSON of the form `{ "<locale>": { nested keys } }`.
    ///
    /// Nested objects are flattened into dotted keys, so
    /// `{"en": {"events": {"title": "Events"}}}` defines `events.title`.
    /// Non-string leaves are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let root: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (locale, tree) in root {
            let mut flat = BTreeMap::new();
            flatten_into(&mut flat, String::new(), tree);
            catalog.messages.insert(locale, flat);
        }
        Ok(catalog)
    }

    /// Exact lookup with no fallback.
    pub fn get(&self, key: &str, locale: &str) -> Option<&str> {
        self.messages.get(locale)?.get(key).map(String::as_str)
    }

    /// Locales with at least one message.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}

fn flatten_into(out: &mut BTreeMap<String, String>, prefix: String, value: Value) {
    match value {
        Value::String(s) => {
            out.insert(prefix, s);
        }
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() { k } else { format!("{prefix}.{k}") };
                flatten_into(out, key, v);
            }
        }
        _ => {}
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, locale: &str) -> String {
        if let Some(message) = self.get(key, locale) {
            return message.to_string();
        }
        if let Some(message) = self
            .default_locale
            .as_deref()
            .and_then(|fallback| self.get(key, fallback))
        {
            debug!(key, locale, "message missing, using default locale");
            return message.to_string();
        }
        debug!(key, locale, "message missing, using key");
        key.to_string()
    }
}

impl std::fmt::Debug for dyn Translator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Translator")
    }
}
