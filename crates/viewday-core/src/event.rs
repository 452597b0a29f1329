//! Calendar event records pushed to the remote surface.

use serde::{Deserialize, Serialize};

/// Namespace tag for events derived from local notes.
pub const LOCAL_EVENT_NAMESPACE: &str = "local";

/// One calendar entry, recomputed on every scan and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Deterministic composite of namespace, note path, and rule id, so
    /// rescans update the surface in place instead of duplicating.
    pub id: String,
    pub title: String,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub all_day: bool,
    pub color: String,
    pub extended_props: LocalEventProps,
}

impl CalendarEvent {
    /// Identity for the event of one (note, rule) pair.
    pub fn local_id(path: &str, rule_id: &str) -> String {
        format!("{LOCAL_EVENT_NAMESPACE}::{path}::{rule_id}")
    }
}

/// Context the surface echoes back when requesting a write-back, so the
/// engine never has to re-resolve event identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalEventProps {
    pub kind: EventKind,
    pub path: String,
    pub rule_id: String,
    pub property: String,
}

/// Origin of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Local,
}
