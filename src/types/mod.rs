//! Core types for the event catalog.

pub mod handle;
pub mod date;
pub mod raw;
pub mod author;
pub mod view;

pub use handle::Handle;
pub use date::{EventDate, DateParseError};
pub use raw::{RawEvent, RawSession, SessionFormat, RawRecordError};
pub use author::{AuthorRecord, AuthorDirectory, ResolvedAuthor};
pub use view::{EventViewModel, SessionViewModel, SessionKind, Presenters};
