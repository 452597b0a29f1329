//! Engine facade tying the scan and write-back components to one store.

use crate::{linked, scanner, unscheduled, writeback};
use std::sync::Arc;
use viewday_core::{
    CalendarEvent, DocumentStore, LinkedNotesIndex, Rule, StoreResult, UnscheduledItem,
};

pub use crate::writeback::Reschedule;

/// One engine per document store. Scan outputs are derived on every call;
/// the engine holds no state of its own beyond the store handle.
#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<dyn DocumentStore>,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Scanner pass: events for every (document, active rule) pair.
    pub fn scan_local_events(&self, rules: &[Rule]) -> Vec<CalendarEvent> {
        scanner::scan_local_events(self.store.as_ref(), rules)
    }

    /// Detector pass over a caller-supplied rule subset.
    pub fn scan_unscheduled(&self, sources: &[Rule]) -> Vec<UnscheduledItem> {
        unscheduled::scan_unscheduled(self.store.as_ref(), sources)
    }

    /// Indexer pass: external event id → linked notes.
    pub fn index_linked_notes(&self) -> LinkedNotesIndex {
        linked::index_linked_notes(self.store.as_ref())
    }

    /// Move or clear a note's date.
    pub async fn reschedule(&self, request: Reschedule) -> StoreResult<()> {
        writeback::reschedule(self.store.as_ref(), request).await
    }

    /// Attach an external event id to a note.
    pub async fn link_note(&self, path: &str, event_id: &str) -> StoreResult<()> {
        writeback::link(self.store.as_ref(), path, event_id).await
    }

    /// Detach an external event id from a note.
    pub async fn unlink_note(&self, path: &str, event_id: &str) -> StoreResult<()> {
        writeback::unlink(self.store.as_ref(), path, event_id).await
    }
}
