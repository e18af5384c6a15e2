//! Persistence seam for canonical documents

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where canonical documents end up.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Persist `document` under `target` (relative to the store root) and
    /// return the location it was written to.
    async fn persist(&self, target: &Path, document: &[u8]) -> Result<PathBuf>;
}

/// Writes documents below a root directory.
#[derive(Debug, Clone)]
pub struct FileCorpusStore {
    root: PathBuf,
}

impl FileCorpusStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CorpusStore for FileCorpusStore {
    async fn persist(&self, target: &Path, document: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(target);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        tokio::fs::write(&path, document)
            .await
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        debug!("Wrote {} bytes to {}", document.len(), path.display());
        Ok(path)
    }
}

/// Keeps documents in memory; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryCorpusStore {
    documents: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the document stored under `target`, if any.
    pub fn get(&self, target: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.documents.lock().get(target.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

#[async_trait]
impl CorpusStore for InMemoryCorpusStore {
    async fn persist(&self, target: &Path, document: &[u8]) -> Result<PathBuf> {
        self.documents
            .lock()
            .insert(target.to_path_buf(), document.to_vec());
        Ok(target.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileCorpusStore::new(dir.path());

        let written = store
            .persist(Path::new("bibles/kjv.json"), b"[]")
            .await
            .unwrap();

        assert_eq!(written, dir.path().join("bibles/kjv.json"));
        assert_eq!(std::fs::read(&written).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_in_memory_store_keeps_last_write() {
        let store = InMemoryCorpusStore::new();
        store.persist(Path::new("kjv.json"), b"[1]").await.unwrap();
        store.persist(Path::new("kjv.json"), b"[2]").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("kjv.json"), Some(b"[2]".to_vec()));
    }
}
