use async_trait::async_trait;

use super::error::StorageError;

/// Flat, name-addressed file storage for downloaded pictures.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store bytes under `name`.
    ///
    /// Returns `false` if a file with that name already existed; the existing
    /// content is left untouched.
    async fn write(&self, name: &str, data: &[u8]) -> Result<bool, StorageError>;

    /// Retrieve all bytes of a stored file.
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;
}
