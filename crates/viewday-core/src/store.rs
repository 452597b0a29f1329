//! Document store abstraction.
//!
//! The engine never owns documents; it reads and mutates frontmatter
//! through this seam so the same scan and write-back code runs against the
//! host vault in production and an in-memory store in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Frontmatter: an unordered key-to-value mapping. Values may be missing,
/// null, empty strings, scalars, or arrays.
pub type Metadata = HashMap<String, Value>;

/// A metadata mutation applied inside one transactional commit.
pub type MetadataMutation = Box<dyn FnOnce(&mut Metadata) + Send>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced document path does not resolve.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Creation target already exists.
    #[error("document already exists: {0}")]
    AlreadyExists(String),

    /// The transactional mutation could not be committed.
    #[error("transaction failed for {path}: {reason}")]
    Transaction { path: String, reason: String },

    /// IO error during a store operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Frontmatter could not be serialized back.
    #[error("metadata serialization failed: {0}")]
    Serialization(String),
}

/// Handle to one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Stable identifier within the store.
    pub path: String,
    /// Display name derived from the path.
    pub basename: String,
}

impl DocumentHandle {
    /// Derive a handle from a store path.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(path.as_str());
        let basename = file_name.strip_suffix(".md").unwrap_or(file_name).to_string();
        Self { path, basename }
    }

    /// Parent folder of the document, empty at the store root.
    pub fn folder(&self) -> String {
        match self.path.rsplit_once('/') {
            Some((folder, _)) => folder.to_string(),
            None => String::new(),
        }
    }
}

/// Read and mutation access to the host's documents.
///
/// Reads are assumed local and non-blocking (cached by the adapter);
/// mutation is the only asynchronous I/O and must commit or fail as a
/// unit.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Enumerate every document in the store.
    fn documents(&self) -> Vec<DocumentHandle>;

    /// Read a document's frontmatter. `None` when the document does not
    /// exist or carries no frontmatter block.
    fn read_metadata(&self, path: &str) -> Option<Metadata>;

    /// Apply one transactional read-modify-write to a document's metadata.
    async fn mutate_metadata(&self, path: &str, mutation: MetadataMutation) -> StoreResult<()>;

    /// Create a new document with the given frontmatter and body.
    async fn create_document(
        &self,
        path: &str,
        metadata: Metadata,
        body: &str,
    ) -> StoreResult<DocumentHandle>;
}
