//! Scanner: documents × active rules → calendar events.

use tracing::{debug, trace};
use viewday_core::{datetime, value, CalendarEvent, DocumentStore, EventKind, LocalEventProps, Rule};

/// Walk every document against every active rule and emit one event per
/// matching pair. Notes without a usable date value produce nothing here;
/// surfacing those is the unscheduled detector's job.
///
/// A malformed pair never aborts the walk: an unparseable start simply
/// yields an event without an end, and a non-string date value is skipped.
pub fn scan_local_events(store: &dyn DocumentStore, rules: &[Rule]) -> Vec<CalendarEvent> {
    let documents = store.documents();
    let active: Vec<&Rule> = rules.iter().filter(|rule| rule.active).collect();
    let mut events = Vec::new();

    for doc in &documents {
        let metadata = match store.read_metadata(&doc.path) {
            Some(metadata) => metadata,
            None => continue,
        };
        for rule in &active {
            if !rule.matches_path(&doc.path) {
                continue;
            }
            let raw = match value::date_value(&metadata, &rule.property) {
                Some(raw) => raw,
                None => {
                    trace!(path = %doc.path, rule = %rule.id, "no usable date value, skipping");
                    continue;
                }
            };

            let all_day = datetime::is_all_day(raw);
            let end = if all_day {
                None
            } else {
                value::duration_minutes(&metadata).and_then(|minutes| datetime::end_of(raw, minutes))
            };

            events.push(CalendarEvent {
                id: CalendarEvent::local_id(&doc.path, &rule.id),
                title: doc.basename.clone(),
                start: raw.to_string(),
                end,
                all_day,
                color: rule.color.clone(),
                extended_props: LocalEventProps {
                    kind: EventKind::Local,
                    path: doc.path.clone(),
                    rule_id: rule.id.clone(),
                    property: rule.property.clone(),
                },
            });
        }
    }

    debug!(
        documents = documents.len(),
        rules = active.len(),
        events = events.len(),
        "local event scan complete"
    );
    events
}
