// Local filesystem adapter - File system operations on the host

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn remove_file(&self, path: &Path) -> Result<(), DomainError> {
        fs::remove_file(path)
            .await
            .map_err(|e| DomainError::fs("remove", path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), DomainError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(path)
            .await
            .map_err(|e| DomainError::fs("create directory", path, e))
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        let rename_err = match fs::rename(from, to).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // Copy only when rename cannot work at all; any other failure leaves
        // the destination as it was
        if rename_err.kind() != ErrorKind::CrossesDevices {
            return Err(DomainError::fs("move", from, rename_err));
        }

        debug!(
            "{} and {} are on different devices, copying",
            from.display(),
            to.display()
        );
        fs::copy(from, to)
            .await
            .map_err(|e| DomainError::fs("move", from, e))?;
        fs::remove_file(from)
            .await
            .map_err(|e| DomainError::fs("remove after copy", from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_replaces_destination() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("clip.temp.mp4");
        let to = dir.path().join("clip.mp4");
        std::fs::write(&from, b"new").unwrap();
        std::fs::write(&to, b"old").unwrap();

        let fs = LocalFsAdapter::new();
        fs.move_file(&from, &to).await.unwrap();

        assert!(!fs.exists(&from).await);
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_move_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFsAdapter::new();

        let err = fs
            .move_file(&dir.path().join("missing"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FsFail { operation: "move", .. }));
    }

    #[tokio::test]
    async fn test_failed_move_leaves_destination_intact() {
        let dir = TempDir::new().unwrap();
        let to = dir.path().join("clip.mp4");
        std::fs::write(&to, b"original").unwrap();

        let fs = LocalFsAdapter::new();
        assert!(fs
            .move_file(&dir.path().join("clip.temp.mp4"), &to)
            .await
            .is_err());
        assert_eq!(std::fs::read(&to).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_remove_and_create_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let fs = LocalFsAdapter::new();

        fs.create_dir_all(&nested).await.unwrap();
        let file = nested.join("x.mkv");
        std::fs::write(&file, b"x").unwrap();
        assert!(fs.exists(&file).await);

        fs.remove_file(&file).await.unwrap();
        assert!(!fs.exists(&file).await);
        assert!(fs.remove_file(&file).await.is_err());
    }
}
