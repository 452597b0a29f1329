//! Debounced vault change notifications.
//!
//! Store change bursts (live typing, bulk renames) are coalesced by a
//! leading-edge [`ChangeDebouncer`] so the scan and reindex pair runs at
//! a bounded rate while the displayed calendar stays close to real time.
//! [`VaultWatcher`] feeds the debouncer from a `notify` watcher over the
//! vault directory.

pub mod debounce;
pub mod error;
pub mod events;
pub mod watcher;

pub use debounce::{ChangeDebouncer, DebounceGate, Refresh, DEFAULT_COOLDOWN};
pub use error::{Error, Result};
pub use events::{ChangeEvent, ChangeKind};
pub use watcher::VaultWatcher;
