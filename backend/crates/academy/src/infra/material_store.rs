//! On-Disk Material Storage
//!
//! Files live flat under one root directory. Stored names are prefixed
//! with a UUID so uploads never collide; the original name is kept for
//! the download filename.

use std::path::{Path, PathBuf};

use crate::error::{AcademyError, AcademyResult};

/// Filesystem-backed material storage
#[derive(Debug, Clone)]
pub struct FsMaterialStore {
    root: PathBuf,
}

impl FsMaterialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Save a file and return the stored (relative) name
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AcademyResult<String> {
        let sanitized = sanitize_file_name(original_name)?;
        let stored_name = format!("{}_{}", uuid::Uuid::new_v4(), sanitized);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        Ok(stored_name)
    }

    /// Read a stored file back
    pub async fn read(&self, stored_name: &str) -> AcademyResult<Vec<u8>> {
        // Names are validated at save time, but never trust a path from
        // the database blindly
        if Path::new(stored_name).components().count() != 1 {
            return Err(AcademyError::MaterialNotFound);
        }

        Ok(tokio::fs::read(self.root.join(stored_name)).await?)
    }
}

/// Strip any directory part and refuse empty or traversal-shaped names
fn sanitize_file_name(name: &str) -> AcademyResult<String> {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if base.is_empty() || base == "." || base == ".." {
        return Err(AcademyError::Validation("Invalid file name".into()));
    }

    Ok(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMaterialStore::new(dir.path());

        let stored = store.save("notes.pdf", b"%PDF-1.4 content").await.unwrap();
        assert!(stored.ends_with("_notes.pdf"));

        let bytes = store.read(&stored).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 content");
    }

    #[tokio::test]
    async fn save_strips_directories_from_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMaterialStore::new(dir.path());

        let stored = store
            .save("../../etc/passwd.pdf", b"content")
            .await
            .unwrap();
        assert!(stored.ends_with("_passwd.pdf"));
        assert!(!stored.contains('/'));
    }

    #[tokio::test]
    async fn read_refuses_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMaterialStore::new(dir.path());

        assert!(matches!(
            store.read("../outside.pdf").await,
            Err(AcademyError::MaterialNotFound)
        ));
    }

    #[tokio::test]
    async fn two_saves_of_the_same_name_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMaterialStore::new(dir.path());

        let a = store.save("notes.pdf", b"one").await.unwrap();
        let b = store.save("notes.pdf", b"two").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.read(&a).await.unwrap(), b"one");
        assert_eq!(store.read(&b).await.unwrap(), b"two");
    }
}
