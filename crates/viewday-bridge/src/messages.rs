//! Typed message records crossing the surface boundary.
//!
//! Inbound payloads are duck-typed JSON on the wire; they become a tagged
//! union here, validated at the boundary. A payload whose `kind` this
//! version does not understand fails to parse and is ignored by the
//! dispatcher, keeping the channel forward-compatible.

use crate::host::Period;
use crate::meeting::MeetingFields;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use viewday_core::{CalendarEvent, LinkedNotesIndex, Rule, UnscheduledItem};

/// Messages accepted from the remote surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum InboundMessage {
    /// Replace the persisted rule set and rescan.
    #[serde(rename = "CONFIGURE_RULES")]
    ConfigureRules { rules: Vec<Rule> },

    /// Run the unscheduled detector over an ad hoc rule subset and reply.
    #[serde(rename = "FETCH_UNSCHEDULED")]
    FetchUnscheduled { sources: Vec<Rule> },

    /// Reschedule (or clear) a note's date. `UPDATE_NOTE_DATE` is the
    /// older name for the same operation.
    #[serde(rename = "UPDATE_LOCAL_EVENT", alias = "UPDATE_NOTE_DATE")]
    UpdateLocalEvent {
        path: String,
        property: String,
        #[serde(default, rename = "newValue")]
        new_value: Option<String>,
        #[serde(default)]
        duration: Option<f64>,
    },

    /// Open the host's document picker; the chosen note is linked to the
    /// given external event.
    #[serde(rename = "TRIGGER_FUZZY_SEARCH")]
    TriggerFuzzySearch {
        #[serde(rename = "eventId")]
        event_id: String,
    },

    /// Remove the link between a note and an external event.
    #[serde(rename = "UNLINK_DOCUMENT")]
    UnlinkDocument {
        #[serde(rename = "eventId")]
        event_id: String,
        path: String,
    },

    /// Create a new note with a generated frontmatter block and open it.
    #[serde(rename = "CREATE_LOCAL_NOTE")]
    CreateLocalNote {
        title: String,
        #[serde(default)]
        frontmatter: Option<HashMap<String, Value>>,
        #[serde(default)]
        folder: Option<String>,
    },

    /// The surface finished rendering; push everything.
    #[serde(rename = "viewday-ready")]
    SurfaceReady,

    /// Open a URL in the external browser.
    #[serde(rename = "OPEN_EXTERNAL_URL")]
    OpenExternalUrl { url: String },

    /// Create a formatted meeting note from a remote calendar event.
    #[serde(rename = "create-meeting-note")]
    CreateMeetingNote(MeetingFields),

    /// Resolve or create a periodic note via the host convention.
    #[serde(rename = "OPEN_PERIODIC_NOTE")]
    OpenPeriodicNote { period: Period, date: String },
}

/// Payloads pushed to the remote surface.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum OutboundMessage {
    /// Fresh scan result. The rule set rides along so the surface can
    /// confirm active/inactive display state.
    #[serde(rename = "SYNC_LOCAL_EVENTS")]
    SyncLocalEvents {
        events: Vec<CalendarEvent>,
        sources: Vec<Rule>,
    },

    /// Fresh linked-notes index.
    #[serde(rename = "SYNC_LINKED_NOTES")]
    SyncLinkedNotes {
        #[serde(rename = "linkedNotes")]
        linked_notes: LinkedNotesIndex,
    },

    /// Reply to `FETCH_UNSCHEDULED`, emitted even when empty so the
    /// surface can tell "no candidates" from "no response".
    #[serde(rename = "UNSCHEDULED_RESULTS")]
    UnscheduledResults { items: Vec<UnscheduledItem> },
}

/// Single point of contact for posting into the rendered surface.
///
/// The channel is a same-process boundary: no acknowledgement is awaited
/// and delivery failures are not retried.
pub trait SurfacePort: Send + Sync {
    fn post(&self, message: OutboundMessage);
}
