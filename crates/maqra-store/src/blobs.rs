//! Large-object storage for raw media bytes.
//!
//! One file per [`BlobKey`] under a dedicated directory, accessed through
//! `tokio::fs`.  Same-key puts are last-write-wins; the repository
//! guarantees at most one in-flight write per key, so no locking is done
//! here.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use maqra_shared::BlobKey;

use crate::error::{Result, StoreError};

/// Directory-backed blob store.
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Open (or create) the default blob directory under the platform
    /// data dir (`.../maqra/blobs`).
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "maqra", "maqra").ok_or(StoreError::NoDataDir)?;

        let dir = project_dirs.data_dir().join("blobs");
        std::fs::create_dir_all(&dir)?;

        tracing::info!(path = %dir.display(), "opening blob store");

        Ok(Self { dir })
    }

    /// Open a blob store rooted at an explicit directory.
    ///
    /// The directory is not created here; a missing or unwritable root
    /// surfaces as an I/O error from the first operation.
    pub fn open_at(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Write `bytes` under `key`, replacing any previous object.
    pub async fn put(&self, key: BlobKey, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(%key, bytes = bytes.len(), "blob written");
        Ok(())
    }

    /// Read the object under `key`.  A missing key is `Ok(None)`, never an
    /// error.
    pub async fn get(&self, key: BlobKey) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.blob_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Delete the object under `key`.  Returns `true` if one existed.
    pub async fn delete(&self, key: BlobKey) -> Result<bool> {
        match tokio::fs::remove_file(self.blob_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn blob_path(&self, key: BlobKey) -> PathBuf {
        self.dir.join(format!("{key}.bin"))
    }
}
