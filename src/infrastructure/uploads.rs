//! Document blob store
//!
//! Stores uploaded employee identity documents on the local filesystem and
//! hands back an opaque filename; the database only ever holds that
//! reference. Filenames are uuid-prefixed so concurrent uploads of the same
//! original name cannot collide.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

#[derive(Clone)]
pub struct DocumentStore {
    root: PathBuf,
    max_file_size: usize,
}

/// Strip an uploaded filename down to a safe character set. Path
/// separators and parent references never survive.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    }
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Persist an uploaded document and return the stored filename.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> DomainResult<String> {
        if data.is_empty() {
            return Err(DomainError::Validation("Empty file provided".to_string()));
        }
        if data.len() > self.max_file_size {
            return Err(DomainError::Validation(format!(
                "File too large. Maximum size is {} bytes",
                self.max_file_size
            )));
        }

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| DomainError::Storage(format!("Failed to save document: {}", e)))?;

        Ok(stored_name)
    }

    /// Resolve a stored filename to its on-disk path, refusing anything
    /// that does not look like a name this store produced.
    pub fn path_for(&self, stored_name: &str) -> DomainResult<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains('/')
            || stored_name.contains('\\')
            || stored_name.contains("..")
        {
            return Err(DomainError::Validation(
                "Invalid document reference".to_string(),
            ));
        }
        Ok(self.root.join(stored_name))
    }

    /// Read a stored document. `NotFound` when the file is missing.
    pub async fn load(&self, stored_name: &str) -> DomainResult<Vec<u8>> {
        let path = self.path_for(stored_name)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DomainError::NotFound {
                entity: "Document",
                field: "file",
                value: stored_name.to_string(),
            }),
            Err(e) => Err(DomainError::Storage(format!(
                "Failed to read document: {}",
                e
            ))),
        }
    }

    /// Best-effort removal; the document write is outside the database
    /// transaction, so cleanup failures only warrant a warning.
    pub async fn remove(&self, stored_name: &str) {
        let Ok(path) = self.path_for(stored_name) else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(file = %stored_name, "Failed to remove document: {}", e);
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), 1024);
        (dir, store)
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("scan.pdf"), "scan.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("c:\\docs\\id card.png"), "id_card.png");
        assert_eq!(sanitize_filename("..."), "document");
    }

    #[tokio::test]
    async fn store_and_load_round_trip() {
        let (_dir, store) = store();
        store.init().await.unwrap();

        let name = store.store("scan.pdf", b"%PDF-1.4 fake").await.unwrap();
        assert!(name.ends_with("_scan.pdf"));

        let data = store.load(&name).await.unwrap();
        assert_eq!(data, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn same_original_name_gets_distinct_stored_names() {
        let (_dir, store) = store();
        store.init().await.unwrap();

        let a = store.store("scan.pdf", b"one").await.unwrap();
        let b = store.store("scan.pdf", b"two").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn oversized_and_empty_files_are_rejected() {
        let (_dir, store) = store();
        store.init().await.unwrap();

        let big = vec![0u8; 2048];
        assert!(matches!(
            store.store("big.bin", &big).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            store.store("empty.bin", &[]).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn traversal_references_are_rejected() {
        let (_dir, store) = store();
        assert!(store.path_for("../secret").is_err());
        assert!(store.path_for("a/b").is_err());
        assert!(store.load("../../etc/passwd").await.is_err());
    }
}
