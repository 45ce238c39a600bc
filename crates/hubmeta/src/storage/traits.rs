use async_trait::async_trait;

use super::StorageResult;

/// Flat key/value file store addressed by relative paths
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Read file contents
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write file contents, creating parent directories
    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()>;

    /// Delete a file
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// List files directly under a directory, as paths relative to the store root
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;
}
