//! Linked-notes indexer: reverse index from external event ids to notes.

use tracing::debug;
use viewday_core::{value, DocumentStore, LinkedNotesIndex, NoteRef, LINKS_FIELD};

/// Scan every document's link field and build the inverted index. Scalar
/// values are treated as one-element sequences; array elements are coerced
/// to string identifiers.
pub fn index_linked_notes(store: &dyn DocumentStore) -> LinkedNotesIndex {
    let mut index = LinkedNotesIndex::new();

    for doc in store.documents() {
        let Some(metadata) = store.read_metadata(&doc.path) else {
            continue;
        };
        let Some(links) = metadata.get(LINKS_FIELD) else {
            continue;
        };
        for event_id in value::string_list(links) {
            index.entry(event_id).or_default().push(NoteRef {
                path: doc.path.clone(),
                basename: doc.basename.clone(),
            });
        }
    }

    debug!(events = index.len(), "linked notes reindexed");
    index
}
