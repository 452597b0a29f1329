//! Core data model and store abstraction for the Viewday sync engine.
//!
//! This crate defines the types shared across the workspace: mapping rules,
//! calendar event records, unscheduled candidates, the linked-notes index,
//! frontmatter value coercions, and the [`DocumentStore`] seam the engine
//! reads and mutates note metadata through.
//!
//! The engine never owns documents. Production code runs against the host
//! vault (`viewday-vault`); tests run against
//! [`test_support::MemoryStore`].

pub mod datetime;
pub mod event;
pub mod links;
pub mod rule;
pub mod settings;
pub mod store;
pub mod test_support;
pub mod unscheduled;
pub mod value;

pub use event::{CalendarEvent, EventKind, LocalEventProps};
pub use links::{LinkedNotesIndex, NoteRef};
pub use rule::Rule;
pub use settings::{SettingsError, SettingsResult, SettingsStore, ViewdaySettings};
pub use store::{
    DocumentHandle, DocumentStore, Metadata, MetadataMutation, StoreError, StoreResult,
};
pub use unscheduled::UnscheduledItem;
pub use value::{DURATION_FALLBACK_FIELD, DURATION_FIELD, LINKS_FIELD};
