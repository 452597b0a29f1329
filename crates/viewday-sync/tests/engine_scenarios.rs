//! End-to-end engine scenarios over the in-memory store.

use serde_json::json;
use std::sync::Arc;
use viewday_core::test_support::MemoryStore;
use viewday_core::Rule;
use viewday_sync::SyncEngine;

fn rule(json: serde_json::Value) -> Rule {
    serde_json::from_value(json).unwrap()
}

fn engine(store: MemoryStore) -> SyncEngine {
    SyncEngine::new(Arc::new(store))
}

#[test]
fn plain_date_produces_one_all_day_event() {
    let engine = engine(MemoryStore::new().with_document("A.md", json!({"do_date": "2024-03-01"})));
    let rules = [rule(
        json!({"id": "r1", "property": "do_date", "color": "#5e81ac", "active": true}),
    )];

    let events = engine.scan_local_events(&rules);
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert!(event.all_day);
    assert_eq!(event.start, "2024-03-01");
    assert_eq!(event.end, None);
    assert_eq!(event.title, "A");
    assert_eq!(event.color, "#5e81ac");
}

#[test]
fn timed_date_with_duration_gets_a_wall_clock_end() {
    let engine = engine(MemoryStore::new().with_document(
        "B.md",
        json!({"start_date": "2024-03-01T09:00", "duration_minutes": 90}),
    ));
    let rules = [rule(
        json!({"id": "r1", "property": "start_date", "color": "", "active": true}),
    )];

    let events = engine.scan_local_events(&rules);
    assert_eq!(events.len(), 1);
    assert!(!events[0].all_day);
    assert_eq!(events[0].end.as_deref(), Some("2024-03-01T10:30"));
}

#[test]
fn rescanning_an_unchanged_store_is_idempotent() {
    let engine = engine(
        MemoryStore::new()
            .with_document("Tasks/a.md", json!({"due": "2024-03-01"}))
            .with_document("Tasks/b.md", json!({"due": "2024-03-02T14:00", "duration": 30}))
            .with_document("notes.md", json!({"title": "no date"})),
    );
    let rules = [rule(
        json!({"id": "r1", "property": "due", "color": "#bf616a", "active": true}),
    )];

    let first: Vec<String> = engine
        .scan_local_events(&rules)
        .into_iter()
        .map(|e| e.id)
        .collect();
    let second: Vec<String> = engine
        .scan_local_events(&rules)
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn scoped_rule_reports_missing_due_key_as_unscheduled() {
    let engine = engine(
        MemoryStore::new()
            .with_document("Tasks/x.md", json!({"title": "backlog item"}))
            .with_document("Tasks/y.md", json!({"due": "2024-05-01"})),
    );
    let sources = [rule(
        json!({"id": "r1", "property": "due", "path": "Tasks", "color": "#a3be8c", "active": true}),
    )];

    let items = engine.scan_unscheduled(&sources);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].path, "Tasks/x.md");
    assert_eq!(items[0].source_id, "r1");
    assert_eq!(items[0].source_color, "#a3be8c");
}

#[tokio::test]
async fn writeback_then_rescan_reflects_the_move() {
    let engine = engine(MemoryStore::new().with_document("A.md", json!({"do_date": "2024-03-01"})));
    let rules = [rule(
        json!({"id": "r1", "property": "do_date", "color": "", "active": true}),
    )];

    engine
        .reschedule(viewday_sync::Reschedule {
            path: "A.md".into(),
            property: "do_date".into(),
            new_value: Some("2024-03-08".into()),
            duration: None,
        })
        .await
        .unwrap();

    let events = engine.scan_local_events(&rules);
    assert_eq!(events[0].start, "2024-03-08");
}

#[tokio::test]
async fn link_then_reindex_round_trips() {
    let engine = engine(MemoryStore::new().with_document("A.md", json!({})));

    engine.link_note("A.md", "evt-9").await.unwrap();
    let index = engine.index_linked_notes();
    assert_eq!(index["evt-9"][0].path, "A.md");

    engine.unlink_note("A.md", "evt-9").await.unwrap();
    assert!(engine.index_linked_notes().is_empty());
}
