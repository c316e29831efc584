//! Local Disk Audio Storage
//!
//! Stores blobs under `<root>/<id[0..2]>/<id[2..4]>/<id>.<ext>` so that no
//! single directory grows unbounded.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::gateways::AudioStorage;
use crate::domain::models::TrackId;
use crate::shared::errors::StorageError;

/// `AudioStorage` backed by a directory on the local filesystem
pub struct LocalAudioStorage {
    root: PathBuf,
}

impl LocalAudioStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage root if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Join a stored relative path onto the root, refusing anything that could escape it
    fn absolute(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(relative_path);
        let safe = !relative_path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StorageError::InvalidPath(relative_path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Relative blob path for a track
fn blob_path(track_id: &TrackId, extension: &str) -> String {
    let id = track_id.as_uuid().simple().to_string();
    format!("{}/{}/{}.{extension}", &id[0..2], &id[2..4], track_id)
}

async fn write_blob(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(target).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Best-effort removal of a blob whose write did not complete
async fn discard_partial(target: &Path) {
    match fs::remove_file(target).await {
        Ok(()) => tracing::debug!(path = %target.display(), "Removed partial audio blob"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %target.display(), error = %e, "Failed to remove partial audio blob");
        }
    }
}

#[async_trait]
impl AudioStorage for LocalAudioStorage {
    async fn store(&self, track_id: &TrackId, extension: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let relative = blob_path(track_id, extension);
        let target = self.absolute(&relative)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = write_blob(&target, bytes).await {
            tracing::error!(path = %relative, error = %e, "Failed to write audio blob");
            discard_partial(&target).await;
            return Err(e.into());
        }

        tracing::debug!(path = %relative, size = bytes.len(), "Stored audio blob");
        Ok(relative)
    }

    async fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        let path = self.absolute(relative_path)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StorageError::NotFound(relative_path.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(relative_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, relative_path: &str) -> Result<(), StorageError> {
        let path = self.absolute(relative_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %relative_path, "Removed audio blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(relative_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, LocalAudioStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalAudioStorage::new(dir.path());
        (dir, storage)
    }

    #[tokio::test]
    async fn should_shard_blobs_by_id_prefix() {
        let (dir, storage) = storage();
        let id = TrackId::new();
        let simple = id.as_uuid().simple().to_string();

        let relative = storage.store(&id, "mp3", b"ID3").await.unwrap();

        assert_eq!(relative, format!("{}/{}/{id}.mp3", &simple[0..2], &simple[2..4]));
        let on_disk = std::fs::read(dir.path().join(&relative)).unwrap();
        assert_eq!(on_disk, b"ID3");
    }

    #[tokio::test]
    async fn should_resolve_stored_blob() {
        let (dir, storage) = storage();
        let relative = storage.store(&TrackId::new(), "ogg", b"OggS").await.unwrap();

        let path = storage.resolve(&relative).await.unwrap();

        assert!(path.starts_with(dir.path()));
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn should_report_missing_blob() {
        let (_dir, storage) = storage();
        let result = storage.resolve("aa/bb/missing.mp3").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_paths_escaping_root() {
        let (_dir, storage) = storage();
        for path in ["../etc/passwd", "/etc/passwd", "aa/../../x.mp3", ""] {
            assert!(
                matches!(storage.resolve(path).await, Err(StorageError::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn should_remove_blob_once() {
        let (_dir, storage) = storage();
        let relative = storage.store(&TrackId::new(), "wav", b"RIFF").await.unwrap();

        storage.remove(&relative).await.unwrap();

        assert!(matches!(storage.remove(&relative).await, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_report_failed_write_without_removing_foreign_entries() {
        let (dir, storage) = storage();
        let id = TrackId::new();
        // A directory on the blob path makes the write fail
        let squatter = dir.path().join(blob_path(&id, "mp3"));
        std::fs::create_dir_all(&squatter).unwrap();

        let result = storage.store(&id, "mp3", b"audio").await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(squatter.is_dir());
    }

    #[tokio::test]
    async fn should_discard_partial_blob() {
        let (dir, _storage) = storage();
        let partial = dir.path().join("partial.mp3");
        std::fs::write(&partial, b"half").unwrap();

        discard_partial(&partial).await;
        discard_partial(&partial).await;

        assert!(!partial.exists());
    }
}
