//! Vault-to-calendar synchronization engine.
//!
//! Four components over the [`viewday_core::DocumentStore`] seam:
//!
//! - [`scanner`]: turns frontmatter into calendar event records
//! - [`unscheduled`]: finds notes in scope that lack a usable date
//! - [`linked`]: builds the reverse index from external event ids to notes
//! - [`writeback`]: reschedules, links, and unlinks through transactional
//!   metadata mutation
//!
//! All scan outputs are derived and recomputed per trigger; the engine
//! persists nothing itself.

pub mod engine;
pub mod linked;
pub mod scanner;
pub mod unscheduled;
pub mod writeback;

pub use engine::SyncEngine;
pub use writeback::Reschedule;
