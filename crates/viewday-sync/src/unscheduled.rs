//! Unscheduled detector: notes in scope that lack a usable date value.

use std::collections::HashSet;
use tracing::debug;
use viewday_core::{value, DocumentStore, Rule, UnscheduledItem};

/// Scan documents against a caller-supplied rule list (which may differ
/// from the persisted active set) and return deduplicated candidates.
///
/// Matching mode depends on whether the rule carries a folder scope:
///
/// - without a scope the whole store is in range, so only an explicitly
///   empty value counts — an absent key is out of range for that rule,
///   otherwise every note in the store would flood the results;
/// - with a scope the subtree already narrows candidates, so an absent key
///   counts as unscheduled too.
///
/// A document matching several rules is reported once, for the first rule
/// that matched.
pub fn scan_unscheduled(store: &dyn DocumentStore, sources: &[Rule]) -> Vec<UnscheduledItem> {
    let documents = store.documents();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();

    for doc in &documents {
        if seen.contains(doc.path.as_str()) {
            continue;
        }
        let metadata = store.read_metadata(&doc.path);
        for rule in sources {
            let unscheduled = match &rule.folder_scope {
                // Strict: the key must exist and be empty.
                None => metadata
                    .as_ref()
                    .and_then(|meta| meta.get(&rule.property))
                    .map(value::is_empty)
                    .unwrap_or(false),
                // Relaxed: absent counts too, inside the scope.
                Some(_) => {
                    rule.matches_path(&doc.path)
                        && metadata
                            .as_ref()
                            .and_then(|meta| meta.get(&rule.property))
                            .map(value::is_empty)
                            .unwrap_or(true)
                }
            };
            if !unscheduled {
                continue;
            }

            seen.insert(doc.path.as_str());
            items.push(UnscheduledItem {
                path: doc.path.clone(),
                basename: doc.basename.clone(),
                folder: doc.folder(),
                source_id: rule.id.clone(),
                property: rule.property.clone(),
                source_color: rule.color.clone(),
                duration: metadata.as_ref().and_then(value::duration_minutes),
            });
            break;
        }
    }

    debug!(
        documents = documents.len(),
        sources = sources.len(),
        unscheduled = items.len(),
        "unscheduled scan complete"
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use viewday_core::test_support::MemoryStore;

    fn rule(json: serde_json::Value) -> Rule {
        serde_json::from_value(json).unwrap()
    }

    fn store_wide(property: &str) -> Rule {
        rule(json!({"id": "wide", "property": property, "color": "#ebcb8b", "active": true}))
    }

    fn scoped(property: &str, scope: &str) -> Rule {
        rule(json!({
            "id": "scoped", "property": property, "folderScope": scope,
            "color": "#d08770", "active": true,
        }))
    }

    #[test]
    fn strict_mode_requires_an_explicit_empty_key() {
        let store = MemoryStore::new()
            .with_document("empty.md", json!({"due": ""}))
            .with_document("absent.md", json!({"title": "x"}))
            .with_document("scheduled.md", json!({"due": "2024-03-01"}));

        let items = scan_unscheduled(&store, &[store_wide("due")]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "empty.md");
    }

    #[test]
    fn relaxed_mode_accepts_absent_keys_inside_scope() {
        let store = MemoryStore::new()
            .with_document("Tasks/x.md", json!({"title": "x"}))
            .with_document("Tasks/done.md", json!({"due": "2024-03-01"}))
            .with_document("Elsewhere/y.md", json!({"title": "y"}));

        let items = scan_unscheduled(&store, &[scoped("due", "Tasks")]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "Tasks/x.md");
        assert_eq!(items[0].folder, "Tasks");
    }

    #[test]
    fn document_without_frontmatter_counts_in_relaxed_mode_only() {
        let store = MemoryStore::new().with_bare_document("Tasks/bare.md");

        assert!(scan_unscheduled(&store, &[store_wide("due")]).is_empty());
        let items = scan_unscheduled(&store, &[scoped("due", "Tasks")]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn deduplicates_by_path_keeping_first_match() {
        let store = MemoryStore::new().with_document("Tasks/x.md", json!({"due": "", "when": ""}));
        let first = rule(json!({"id": "first", "property": "due", "color": "#111", "active": true}));
        let second =
            rule(json!({"id": "second", "property": "when", "color": "#222", "active": true}));

        let items = scan_unscheduled(&store, &[first, second]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source_id, "first");
    }

    #[test]
    fn carries_best_effort_duration() {
        let store = MemoryStore::new()
            .with_document("a.md", json!({"due": "", "duration_minutes": 45}))
            .with_document("b.md", json!({"due": "", "duration": "30"}))
            .with_document("c.md", json!({"due": ""}));

        let items = scan_unscheduled(&store, &[store_wide("due")]);
        let by_path = |p: &str| items.iter().find(|i| i.path == p).unwrap();
        assert_eq!(by_path("a.md").duration, Some(45.0));
        assert_eq!(by_path("b.md").duration, Some(30.0));
        assert_eq!(by_path("c.md").duration, None);
    }

    #[test]
    fn inactive_rules_still_detect() {
        let store = MemoryStore::new().with_document("a.md", json!({"due": ""}));
        let inactive =
            rule(json!({"id": "r", "property": "due", "color": "", "active": false}));
        assert_eq!(scan_unscheduled(&store, &[inactive]).len(), 1);
    }

    #[test]
    fn empty_result_is_a_result() {
        let store = MemoryStore::new();
        assert!(scan_unscheduled(&store, &[store_wide("due")]).is_empty());
    }
}
