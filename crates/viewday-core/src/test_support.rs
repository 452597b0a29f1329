//! In-memory document store and fixture helpers for tests.

use crate::store::{
    DocumentHandle, DocumentStore, Metadata, MetadataMutation, StoreError, StoreResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Build a [`Metadata`] mapping from a JSON object literal.
pub fn metadata_from(value: Value) -> Metadata {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Metadata::new(),
    }
}

#[derive(Debug, Clone, Default)]
struct StoredDoc {
    metadata: Option<Metadata>,
    body: String,
}

/// In-memory [`DocumentStore`]. Documents iterate in path order so scans
/// are deterministic; writes can be forced to fail to exercise the
/// transactional-failure path.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, StoredDoc>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with frontmatter built from a JSON object literal.
    pub fn with_document(self, path: &str, metadata: Value) -> Self {
        self.insert(path, Some(metadata_from(metadata)), "");
        self
    }

    /// Add a document without a frontmatter block.
    pub fn with_bare_document(self, path: &str) -> Self {
        self.insert(path, None, "");
        self
    }

    pub fn insert(&self, path: &str, metadata: Option<Metadata>, body: &str) {
        self.documents.lock().unwrap().insert(
            path.to_string(),
            StoredDoc {
                metadata,
                body: body.to_string(),
            },
        );
    }

    /// Inspect a document's current metadata.
    pub fn metadata(&self, path: &str) -> Option<Metadata> {
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .and_then(|doc| doc.metadata.clone())
    }

    pub fn body(&self, path: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .map(|doc| doc.body.clone())
    }

    /// Make every subsequent mutation fail, simulating a concurrent
    /// external modification.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn documents(&self) -> Vec<DocumentHandle> {
        self.documents
            .lock()
            .unwrap()
            .keys()
            .map(DocumentHandle::from_path)
            .collect()
    }

    fn read_metadata(&self, path: &str) -> Option<Metadata> {
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .and_then(|doc| doc.metadata.clone())
    }

    async fn mutate_metadata(&self, path: &str, mutation: MetadataMutation) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Transaction {
                path: path.to_string(),
                reason: "write rejected by test store".to_string(),
            });
        }
        let mut documents = self.documents.lock().unwrap();
        let doc = documents
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        let mut metadata = doc.metadata.take().unwrap_or_default();
        mutation(&mut metadata);
        doc.metadata = Some(metadata);
        Ok(())
    }

    async fn create_document(
        &self,
        path: &str,
        metadata: Metadata,
        body: &str,
    ) -> StoreResult<DocumentHandle> {
        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        documents.insert(
            path.to_string(),
            StoredDoc {
                metadata: Some(metadata),
                body: body.to_string(),
            },
        );
        Ok(DocumentHandle::from_path(path))
    }
}
