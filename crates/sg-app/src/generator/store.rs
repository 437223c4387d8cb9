use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Persists a finished artifact. The controller computes the path; the
/// store performs the write.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Writes to the local filesystem, creating missing parent directories.
pub struct DiskStore;

#[async_trait]
impl ArtifactStore for DiskStore {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos/nested/vid_1.mp4");

        DiskStore.write(&path, b"mp4 bytes").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"mp4 bytes");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vid_1.mp4");

        DiskStore.write(&path, b"first").await.unwrap();
        DiskStore.write(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
