//! Locale-aware string ordering for facet lists.
//!
//! ## Ordering
//!
//! Strings are compared on a *collation key* first and on their raw text
//! second, so the order is total and deterministic:
//!
//! ```text
//! compare(a, b) = key(a).cmp(key(b)).then(a.cmp(b))
//! key(s)        = fold(lowercase(trim(s)))
//! ```
//!
//! `fold` maps accented Latin letters to their base letter ("É" sorts with
//! "e"). Nordic locales keep their extra letters distinct and put them after
//! "z", in the order of the local alphabet.

use std::cmp::Ordering;

/// Language tailoring derived from a locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tailoring {
    Root,
    /// sv, fi: å ä ö after z.
    Swedish,
    /// da, nb, nn, no: æ ø å after z.
    Danish,
}

impl Tailoring {
    fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "sv" | "fi" => Self::Swedish,
            "da" | "nb" | "nn" | "no" => Self::Danish,
            _ => Self::Root,
        }
    }

    /// Letters sorted after 'z' in this tailoring, mapped past 'z' in order.
    fn after_z(self, c: char) -> Option<char> {
        let position = match (self, c) {
            (Self::Swedish, 'å') => 0,
            (Self::Swedish, 'ä') | (Self::Swedish, 'æ') => 1,
            (Self::Swedish, 'ö') | (Self::Swedish, 'ø') => 2,
            (Self::Danish, 'æ') | (Self::Danish, 'ä') => 0,
            (Self::Danish, 'ø') | (Self::Danish, 'ö') => 1,
            (Self::Danish, 'å') => 2,
            _ => return None,
        };
        char::from_u32('z' as u32 + 1 + position)
    }
}

/// Base letter(s) of an accented Latin character, if it has one.
fn fold_char(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(base)
}

/// Primary collation key of `text` under `locale`.
pub fn collation_key(text: &str, locale: &str) -> String {
    let tailoring = Tailoring::for_locale(locale);
    let mut key = String::with_capacity(text.len());
    for c in text.trim().chars().flat_map(char::to_lowercase) {
        if let Some(tailored) = tailoring.after_z(c) {
            key.push(tailored);
        } else if let Some(base) = fold_char(c) {
            key.push_str(base);
        } else {
            key.push(c);
        }
    }
    key
}

/// Compare two strings for display ordering under `locale`.
pub fn compare(a: &str, b: &str, locale: &str) -> Ordering {
    collation_key(a, locale)
        .cmp(&collation_key(b, locale))
        .then_with(|| a.cmp(b))
}

/// Sort strings in place with [`compare`].
///
/// Keys are computed once per element.
pub fn sort_strings(values: &mut [String], locale: &str) {
    values.sort_by_cached_key(|v| (collation_key(v, locale), v.clone()));
}
