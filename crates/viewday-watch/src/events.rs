//! Vault change event records.

use chrono::{DateTime, Utc};
use notify::event::ModifyKind;
use notify::EventKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One change to a markdown note in the vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Unique identifier for this event.
    pub id: Uuid,
    /// Kind of change.
    pub kind: ChangeKind,
    /// Vault path of the note.
    pub path: PathBuf,
    /// When the change was observed.
    pub timestamp: DateTime<Utc>,
}

/// Kind of vault change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Modified,
    Renamed,
    Deleted,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            path,
            timestamp: Utc::now(),
        }
    }

    /// Map a raw notify event onto a note change. Non-markdown paths and
    /// event kinds the engine does not care about yield `None`.
    pub fn from_notify(event: &notify::Event) -> Option<Self> {
        let path = event
            .paths
            .iter()
            .find(|path| path.extension().is_some_and(|ext| ext == "md"))?
            .clone();
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Renamed,
            EventKind::Modify(_) => ChangeKind::Modified,
            EventKind::Remove(_) => ChangeKind::Deleted,
            _ => return None,
        };
        Some(Self::new(kind, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RenameMode};

    fn notify_event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn markdown_changes_are_mapped() {
        let created = ChangeEvent::from_notify(&notify_event(
            EventKind::Create(CreateKind::File),
            "Tasks/a.md",
        ))
        .unwrap();
        assert_eq!(created.kind, ChangeKind::Created);

        let modified = ChangeEvent::from_notify(&notify_event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "a.md",
        ))
        .unwrap();
        assert_eq!(modified.kind, ChangeKind::Modified);

        let renamed = ChangeEvent::from_notify(&notify_event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            "a.md",
        ))
        .unwrap();
        assert_eq!(renamed.kind, ChangeKind::Renamed);
    }

    #[test]
    fn non_markdown_paths_are_ignored() {
        assert!(ChangeEvent::from_notify(&notify_event(
            EventKind::Create(CreateKind::File),
            "image.png",
        ))
        .is_none());
    }

    #[test]
    fn access_events_are_ignored() {
        assert!(ChangeEvent::from_notify(&notify_event(
            EventKind::Access(notify::event::AccessKind::Read),
            "a.md",
        ))
        .is_none());
    }
}
