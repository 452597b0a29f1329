//! Filesystem document store.
//!
//! Implements [`viewday_core::DocumentStore`] over a directory of markdown
//! notes. Frontmatter is the YAML block between leading `---` fences;
//! mutation rewrites the block while preserving the body, committing
//! through a temp-file-plus-rename so a failed write never corrupts a
//! note.

pub mod frontmatter;
pub mod store;

pub use store::VaultStore;
