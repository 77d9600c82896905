//! Product image files and their lifecycle.
//!
//! The database only holds the path string; the bytes live in a
//! [`FileStorage`]. [`Attachments`] decides when a file is kept, replaced or
//! removed as the owning product is created, updated and deleted. Removal
//! after a committed change is best-effort and reported as a
//! [`CleanupWarning`], never as an error.

use async_trait::async_trait;
use axum::body::Bytes;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

/// Storage medium for uploaded images, addressed by path string
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist `bytes` under a collision-free name derived from
    /// `original_name`, returning the stored path
    async fn store(&self, original_name: &str, bytes: Bytes) -> io::Result<String>;

    /// Remove a previously stored file
    async fn remove(&self, path: &str) -> io::Result<()>;
}

/// Files kept in a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths outside the storage root are never touched
    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let candidate = Path::new(path);
        let escapes = candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if escapes || !candidate.starts_with(&self.root) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is outside the upload directory", path),
            ));
        }
        Ok(candidate.to_path_buf())
    }
}

/// Keep the last path segment and replace anything outside `[A-Za-z0-9._-]`
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, original_name: &str, bytes: Bytes) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, path: &str) -> io::Result<()> {
        let resolved = self.resolve(path)?;
        tokio::fs::remove_file(resolved).await
    }
}

/// A file that could not be removed after its record change was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to remove '{}': {}", self.path, self.reason)
    }
}

/// Outcome of a committed mutation plus any non-fatal cleanup failure
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub value: T,
    pub warning: Option<CleanupWarning>,
}

impl<T> Committed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Committed<U> {
        Committed {
            value: f(self.value),
            warning: self.warning,
        }
    }
}

/// Image lifecycle rules on top of a [`FileStorage`]
pub struct Attachments<S: FileStorage> {
    storage: Arc<S>,
}

impl<S: FileStorage> Attachments<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Save an uploaded file and hand back its path
    pub async fn save(&self, original_name: &str, bytes: Bytes) -> ProductResult<String> {
        let path = self.storage.store(original_name, bytes).await?;
        Ok(path)
    }

    /// A product cannot exist without an image
    pub fn require(candidate: Option<&str>) -> ProductResult<&str> {
        match candidate {
            Some(path) if !path.trim().is_empty() => Ok(path),
            _ => Err(ProductError::MissingImage),
        }
    }

    /// Drop a candidate upload whose record change was rejected.
    /// Failure is only logged.
    pub async fn discard(&self, candidate: Option<&str>) {
        let Some(path) = candidate.filter(|p| !p.is_empty()) else {
            return;
        };

        if let Err(e) = self.storage.remove(path).await {
            warn!(path, error = %e, "Failed to discard rejected upload");
        }
    }

    /// Remove a file that is no longer referenced by any record
    pub async fn release(&self, path: &str) -> Option<CleanupWarning> {
        match self.storage.remove(path).await {
            Ok(()) => {
                debug!(path, "Removed stale image");
                None
            }
            Err(e) => {
                warn!(path, error = %e, "Failed to remove stale image");
                Some(CleanupWarning {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// After an update committed `new`, remove `old` unless it is empty or
    /// still the live image
    pub async fn replace(&self, old: Option<&str>, new: Option<&str>) -> Option<CleanupWarning> {
        match (old, new) {
            (Some(old), Some(new)) if !old.is_empty() && old != new => self.release(old).await,
            _ => None,
        }
    }
}

impl<S: FileStorage> Clone for Attachments<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("lamp.png"), "lamp.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\shots\\my photo.jpg"), "my_photo.jpg");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_require_rejects_absent_or_blank() {
        type A = Attachments<MockFileStorage>;

        assert!(matches!(A::require(None), Err(ProductError::MissingImage)));
        assert!(matches!(A::require(Some(" ")), Err(ProductError::MissingImage)));
        assert_eq!(A::require(Some("uploads/a.png")).unwrap(), "uploads/a.png");
    }

    #[tokio::test]
    async fn test_local_storage_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let path = storage
            .store("desk lamp.png", Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();

        assert!(path.ends_with("-desk_lamp.png"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"\x89PNG");

        storage.remove(&path).await.unwrap();
        assert!(!Path::new(&path).exists());
    }

    #[tokio::test]
    async fn test_local_storage_names_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        let first = storage.store("a.png", Bytes::from_static(b"1")).await.unwrap();
        let second = storage.store("a.png", Bytes::from_static(b"2")).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_local_storage_refuses_paths_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let outside = dir.path().join("other.png");
        tokio::fs::write(&outside, b"x").await.unwrap();

        let err = storage
            .remove(&outside.to_string_lossy())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(outside.exists());

        let sneaky = format!("{}/../other.png", storage.root().display());
        assert!(storage.remove(&sneaky).await.is_err());
        assert!(outside.exists());
    }

    #[tokio::test]
    async fn test_release_reports_failure_as_warning() {
        let mut storage = MockFileStorage::new();
        storage
            .expect_remove()
            .with(eq("uploads/a.png"))
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));

        let warning = Attachments::new(storage)
            .release("uploads/a.png")
            .await
            .unwrap();

        assert_eq!(warning.path, "uploads/a.png");
        assert!(warning.to_string().contains("gone"));
    }

    #[tokio::test]
    async fn test_replace_skips_same_or_empty_old_path() {
        let mut storage = MockFileStorage::new();
        storage.expect_remove().times(0);
        let attachments = Attachments::new(storage);

        assert!(attachments.replace(Some("uploads/a.png"), Some("uploads/a.png")).await.is_none());
        assert!(attachments.replace(Some(""), Some("uploads/b.png")).await.is_none());
        assert!(attachments.replace(None, Some("uploads/b.png")).await.is_none());
        assert!(attachments.replace(Some("uploads/a.png"), None).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_removes_old_once() {
        let mut storage = MockFileStorage::new();
        storage
            .expect_remove()
            .with(eq("uploads/a.png"))
            .times(1)
            .returning(|_| Ok(()));

        let warning = Attachments::new(storage)
            .replace(Some("uploads/a.png"), Some("uploads/b.png"))
            .await;
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_discard_swallows_failure() {
        let mut storage = MockFileStorage::new();
        storage
            .expect_remove()
            .times(1)
            .returning(|_| Err(io::Error::other("busy")));

        let attachments = Attachments::new(storage);
        attachments.discard(Some("uploads/a.png")).await;
        attachments.discard(None).await;
    }

    #[test]
    fn test_committed_map_keeps_warning() {
        let committed = Committed {
            value: 2,
            warning: Some(CleanupWarning {
                path: "uploads/a.png".into(),
                reason: "denied".into(),
            }),
        };

        let mapped = committed.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert!(mapped.warning.is_some());
        assert!(Committed::clean(()).warning.is_none());
    }
}
