//! Host capability seam.
//!
//! Everything the dispatcher needs from the surrounding application —
//! picker, navigation, notices — lives behind this trait so the engine
//! can be driven headless in tests and the presentation layer stays an
//! external collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use viewday_core::DocumentHandle;

/// Periodic-note granularity understood by the host convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// Capabilities the host application provides to the dispatcher.
#[async_trait]
pub trait HostActions: Send + Sync {
    /// Present the fuzzy document picker. `None` when the user dismisses
    /// it without choosing.
    async fn pick_document(&self) -> Option<DocumentHandle>;

    /// Bring a note into view.
    async fn open_document(&self, path: &str);

    /// Open a URL in the external browser.
    async fn open_external_url(&self, url: &str);

    /// Resolve or create a date-named note per the host's periodic-note
    /// convention and open it.
    async fn open_periodic_note(&self, period: Period, date: &str);

    /// User-visible notice for reported failures.
    fn notify(&self, message: &str);
}
