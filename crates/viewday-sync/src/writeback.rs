//! Write-back engine: transactional metadata mutations driven by the
//! remote surface.
//!
//! Every operation is one scoped read-modify-write against a single
//! document. Failures are reported to the caller and never retried; the
//! triggering message is simply dropped.

use serde_json::Value;
use tracing::debug;
use viewday_core::{value, DocumentStore, StoreResult, DURATION_FIELD, LINKS_FIELD};

/// A reschedule request from the remote surface.
#[derive(Debug, Clone)]
pub struct Reschedule {
    pub path: String,
    pub property: String,
    /// `None` clears the date instead of writing a literal null token.
    pub new_value: Option<String>,
    /// When present, the duration field is written alongside the date.
    pub duration: Option<f64>,
}

/// Set or clear a note's date property. Touches nothing but the date
/// property and, when a duration accompanies the move, the duration field.
pub async fn reschedule(store: &dyn DocumentStore, request: Reschedule) -> StoreResult<()> {
    let Reschedule {
        path,
        property,
        new_value,
        duration,
    } = request;
    debug!(path = %path, property = %property, clearing = new_value.is_none(), "reschedule");

    store
        .mutate_metadata(&path, Box::new(move |metadata| {
            match new_value {
                Some(value) => {
                    metadata.insert(property, Value::String(value));
                }
                None => {
                    metadata.remove(&property);
                }
            }
            if let Some(minutes) = duration.and_then(serde_json::Number::from_f64) {
                metadata.insert(DURATION_FIELD.to_string(), Value::Number(minutes));
            }
        }))
        .await
}

/// Add one external event id to a note's link field. Absent fields become
/// a single-element sequence; a scalar field is upgraded to a sequence
/// with the existing value first; adding an id that is already present has
/// no further effect.
pub async fn link(store: &dyn DocumentStore, path: &str, event_id: &str) -> StoreResult<()> {
    debug!(path = %path, event_id = %event_id, "link note");
    let event_id = event_id.to_string();

    store
        .mutate_metadata(path, Box::new(move |metadata| {
            let mut ids = metadata
                .get(LINKS_FIELD)
                .map(value::string_list)
                .unwrap_or_default();
            if !ids.iter().any(|id| *id == event_id) {
                ids.push(event_id);
            }
            metadata.insert(
                LINKS_FIELD.to_string(),
                Value::Array(ids.into_iter().map(Value::String).collect()),
            );
        }))
        .await
}

/// Remove one external event id from a note's link field. A scalar field
/// equal to the id becomes an empty sequence; an absent field, or a scalar
/// holding a different id, is left untouched.
pub async fn unlink(store: &dyn DocumentStore, path: &str, event_id: &str) -> StoreResult<()> {
    debug!(path = %path, event_id = %event_id, "unlink note");
    let event_id = event_id.to_string();

    store
        .mutate_metadata(path, Box::new(move |metadata| {
            let Some(links) = metadata.get(LINKS_FIELD) else {
                return;
            };
            let updated = match links {
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .filter(|item| !matches_id(item, &event_id))
                        .cloned()
                        .collect(),
                ),
                scalar if matches_id(scalar, &event_id) => Value::Array(Vec::new()),
                _ => return,
            };
            metadata.insert(LINKS_FIELD.to_string(), updated);
        }))
        .await
}

fn matches_id(value: &Value, event_id: &str) -> bool {
    match value {
        Value::String(s) => s == event_id,
        Value::Number(n) => n.to_string() == event_id,
        _ => false,
    }
}
