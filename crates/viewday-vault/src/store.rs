//! Vault-backed [`DocumentStore`] implementation.

use crate::frontmatter;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use viewday_core::{
    DocumentHandle, DocumentStore, Metadata, MetadataMutation, StoreError, StoreResult,
};
use walkdir::WalkDir;

/// Document store over a directory of markdown notes.
///
/// Store paths are vault-relative with `/` separators, matching the
/// identifiers the rest of the engine and the remote surface use.
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn read_note(&self, path: &str) -> StoreResult<String> {
        match std::fs::read_to_string(self.absolute(path)) {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl DocumentStore for VaultStore {
    fn documents(&self) -> Vec<DocumentHandle> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "md")
            })
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                Some(DocumentHandle::from_path(
                    relative.to_string_lossy().replace('\\', "/"),
                ))
            })
            .collect()
    }

    fn read_metadata(&self, path: &str) -> Option<Metadata> {
        let raw = std::fs::read_to_string(self.absolute(path)).ok()?;
        frontmatter::parse(&raw).metadata
    }

    async fn mutate_metadata(&self, path: &str, mutation: MetadataMutation) -> StoreResult<()> {
        let raw = self.read_note(path)?;
        let frontmatter::ParsedNote { metadata, body } = frontmatter::parse(&raw);
        let mut metadata = metadata.unwrap_or_default();

        mutation(&mut metadata);

        let rendered = frontmatter::render(&metadata, body)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        commit(&self.absolute(path), &rendered).map_err(|err| {
            warn!(path = %path, error = %err, "metadata commit failed");
            StoreError::Transaction {
                path: path.to_string(),
                reason: err.to_string(),
            }
        })?;
        debug!(path = %path, "metadata committed");
        Ok(())
    }

    async fn create_document(
        &self,
        path: &str,
        metadata: Metadata,
        body: &str,
    ) -> StoreResult<DocumentHandle> {
        let absolute = self.absolute(path);
        if absolute.exists() {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = frontmatter::render(&metadata, body)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        commit(&absolute, &rendered).map_err(|err| StoreError::Transaction {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        debug!(path = %path, "note created");
        Ok(DocumentHandle::from_path(path))
    }
}

/// Write through a temp file in the target directory, then rename over
/// the destination, so readers never observe a half-written note.
fn commit(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
