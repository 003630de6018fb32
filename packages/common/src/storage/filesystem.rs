use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::error::StorageError;
use super::traits::FileStore;

/// Filesystem-backed picture store.
///
/// Files live directly under `base_path` as `{name}`; partial writes are
/// staged in `{base_path}/.tmp` and renamed into place.
pub struct FilesystemFileStore {
    base_path: PathBuf,
}

impl FilesystemFileStore {
    /// Create a new filesystem store, creating its directories if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve `name` inside the store root.
    fn file_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\', '\0']);
        if !plain {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn write(&self, name: &str, data: &[u8]) -> Result<bool, StorageError> {
        let file_path = self.file_path(name)?;

        if fs::try_exists(&file_path).await? {
            debug!(path = %file_path.display(), "file already stored, skipping write");
            return Ok(false);
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!(path = %file_path.display(), bytes = data.len(), "file stored");
        Ok(true)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let file_path = self.file_path(name)?;
        match fs::read(&file_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
