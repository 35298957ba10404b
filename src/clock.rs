//! Past/upcoming classification.

use chrono::{DateTime, Utc};

use crate::types::{EventDate, RawEvent};

/// Decides whether an event is already over.
///
/// The pipeline treats this as a black box. Implementations that need
/// end-of-day or multi-day semantics override [`is_past`](Self::is_past).
pub trait EventClock: Send + Sync {
    /// Current evaluation instant.
    fn now(&self) -> DateTime<Utc>;

    /// An event is past when its date is at or before now.
    fn is_past(&self, event: &RawEvent) -> bool {
        event.date.instant() <= self.now()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl EventClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant. Used for reproducible builds and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Freeze at midnight UTC of a calendar day.
    pub fn at_date(date: EventDate) -> Self {
        Self(date.instant())
    }
}

impl EventClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Debug for dyn EventClock + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventClock(now = {})", self.now())
    }
}
