//! Date comparators for event lists.
//!
//! Ties on date fall back to the event id so sorting is deterministic even
//! for events sharing a timestamp.

use std::cmp::Ordering;

use crate::types::EventViewModel;

/// Earliest first.
pub fn ascending_by_date(a: &EventViewModel, b: &EventViewModel) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id))
}

/// Latest first.
pub fn descending_by_date(a: &EventViewModel, b: &EventViewModel) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
}
