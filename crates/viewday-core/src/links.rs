//! Reverse index from external calendar entries to local notes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Map from external event identifier to the notes linking to it, in scan
/// order. Recomputed on every reindex, never stored.
pub type LinkedNotesIndex = HashMap<String, Vec<NoteRef>>;

/// Lightweight reference to one linked note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRef {
    pub path: String,
    pub basename: String,
}
