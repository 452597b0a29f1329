//! Message-driven router between the remote surface and the engine.

use crate::host::HostActions;
use crate::meeting::{sanitize_file_name, MeetingFields};
use crate::messages::{InboundMessage, OutboundMessage, SurfacePort};
use crate::origin::is_allowed_origin;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, trace, warn};
use viewday_core::{Metadata, SettingsStore, StoreError};
use viewday_sync::{Reschedule, SyncEngine};

/// Routes validated inbound messages to the engine, the settings store,
/// or the host, and pushes refreshed payloads back out.
///
/// One message is processed to completion before the next takes effect;
/// the internal gate serializes handling. Every arm isolates its own
/// failures — a bad message is reported (or silently dropped, per the
/// error taxonomy) and never disables subsequent messages.
pub struct Dispatcher {
    engine: SyncEngine,
    settings: Arc<RwLock<SettingsStore>>,
    surface: Arc<dyn SurfacePort>,
    host: Arc<dyn HostActions>,
    gate: Mutex<()>,
}

impl Dispatcher {
    pub fn new(
        engine: SyncEngine,
        settings: Arc<RwLock<SettingsStore>>,
        surface: Arc<dyn SurfacePort>,
        host: Arc<dyn HostActions>,
    ) -> Self {
        Self {
            engine,
            settings,
            surface,
            host,
            gate: Mutex::new(()),
        }
    }

    /// Entry point for one raw message from the surface boundary.
    pub async fn dispatch(&self, origin: &str, payload: Value) {
        if !is_allowed_origin(origin) {
            trace!(origin = %origin, "discarding message from untrusted origin");
            return;
        }
        let message: InboundMessage = match serde_json::from_value(payload) {
            Ok(message) => message,
            Err(err) => {
                debug!(error = %err, "ignoring unrecognized message");
                return;
            }
        };

        let _handling = self.gate.lock().await;
        self.route(message).await;
    }

    async fn route(&self, message: InboundMessage) {
        match message {
            InboundMessage::ConfigureRules { rules } => {
                let save = self.settings.write().await.replace_rules(rules);
                if let Err(err) = save {
                    warn!(error = %err, "failed to persist rule set");
                    self.host.notify("Viewday: could not save calendar rules");
                }
                self.refresh().await;
            }

            InboundMessage::FetchUnscheduled { sources } => {
                let items = self.engine.scan_unscheduled(&sources);
                self.surface.post(OutboundMessage::UnscheduledResults { items });
            }

            InboundMessage::UpdateLocalEvent {
                path,
                property,
                new_value,
                duration,
            } => {
                let result = self
                    .engine
                    .reschedule(Reschedule {
                        path,
                        property,
                        new_value,
                        duration,
                    })
                    .await;
                match result {
                    Ok(()) => self.refresh().await,
                    Err(err) => self.report_write_failure("reschedule", &err),
                }
            }

            InboundMessage::TriggerFuzzySearch { event_id } => {
                let Some(doc) = self.host.pick_document().await else {
                    debug!(event_id = %event_id, "picker dismissed, nothing linked");
                    return;
                };
                match self.engine.link_note(&doc.path, &event_id).await {
                    Ok(()) => self.refresh().await,
                    Err(err) => self.report_write_failure("link", &err),
                }
            }

            InboundMessage::UnlinkDocument { event_id, path } => {
                match self.engine.unlink_note(&path, &event_id).await {
                    Ok(()) => self.refresh().await,
                    Err(err) => self.report_write_failure("unlink", &err),
                }
            }

            InboundMessage::CreateLocalNote {
                title,
                frontmatter,
                folder,
            } => {
                let path = note_path(folder.as_deref(), &title);
                let metadata: Metadata = frontmatter.unwrap_or_default();
                match self
                    .engine
                    .store()
                    .create_document(&path, metadata, "")
                    .await
                {
                    Ok(handle) => {
                        self.host.open_document(&handle.path).await;
                        self.refresh().await;
                    }
                    Err(err) => {
                        warn!(path = %path, error = %err, "note creation failed");
                        self.host
                            .notify(&format!("Viewday: could not create note {path}"));
                    }
                }
            }

            InboundMessage::SurfaceReady => self.refresh().await,

            InboundMessage::OpenExternalUrl { url } => {
                self.host.open_external_url(&url).await;
            }

            InboundMessage::CreateMeetingNote(fields) => {
                self.create_meeting_note(fields).await;
            }

            InboundMessage::OpenPeriodicNote { period, date } => {
                self.host.open_periodic_note(period, &date).await;
            }
        }
    }

    async fn create_meeting_note(&self, fields: MeetingFields) {
        let folder = self
            .settings
            .read()
            .await
            .settings()
            .meeting_note_folder
            .clone();
        let file_name = fields.file_name();
        let path = match folder.as_deref().map(|f| f.trim_end_matches('/')) {
            Some(folder) if !folder.is_empty() => format!("{folder}/{file_name}"),
            _ => file_name,
        };

        match self
            .engine
            .store()
            .create_document(&path, fields.frontmatter(), &fields.body())
            .await
        {
            Ok(handle) => {
                self.host.open_document(&handle.path).await;
                self.refresh().await;
            }
            Err(err) => {
                warn!(path = %path, error = %err, "meeting note creation failed");
                self.host
                    .notify(&format!("Viewday: could not create meeting note {path}"));
            }
        }
    }

    /// Scanner + Indexer re-run with fresh outbound payloads. The full
    /// rule set is echoed back so the surface can mirror active/inactive
    /// state.
    pub async fn refresh(&self) {
        let sources = self.settings.read().await.rules().to_vec();
        let events = self.engine.scan_local_events(&sources);
        self.surface
            .post(OutboundMessage::SyncLocalEvents { events, sources });

        let linked_notes = self.engine.index_linked_notes();
        self.surface
            .post(OutboundMessage::SyncLinkedNotes { linked_notes });
    }

    fn report_write_failure(&self, operation: &str, err: &StoreError) {
        warn!(operation = operation, error = %err, "write-back failed");
        match err {
            StoreError::NotFound(path) => {
                self.host
                    .notify(&format!("Viewday: note not found: {path}"));
            }
            other => {
                self.host
                    .notify(&format!("Viewday: {operation} failed: {other}"));
            }
        }
    }
}

/// Debounced store change notifications re-run the same scan+reindex
/// pair the surface lifecycle messages do.
#[async_trait::async_trait]
impl viewday_watch::Refresh for Dispatcher {
    async fn refresh(&self) {
        Dispatcher::refresh(self).await;
    }
}

fn note_path(folder: Option<&str>, title: &str) -> String {
    let file_name = format!("{}.md", sanitize_file_name(title));
    match folder.map(|f| f.trim_end_matches('/')) {
        Some(folder) if !folder.is_empty() => format!("{folder}/{file_name}"),
        _ => file_name,
    }
}
