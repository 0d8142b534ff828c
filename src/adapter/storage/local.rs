use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::storage::{DownloadedFile, StorageClient};
use crate::domain::media::{MediaKind, detect_image};

/// Stores media under a directory on disk. Meant for development and tests.
pub struct LocalStorageClient {
    root: PathBuf,
}

impl LocalStorageClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        MediaKind::from_key(key).ok_or(AppError::StorageNotFound)?;
        Ok(self.root.join(Path::new(key)))
    }
}

fn storage_error(key: &str, err: std::io::Error) -> AppError {
    warn!("Local storage failed for {}: {}", key, err);
    AppError::StorageError(err.to_string())
}

#[async_trait]
impl StorageClient for LocalStorageClient {
    async fn ensure_bucket(&self) -> AppResult<()> {
        for kind in MediaKind::ALL {
            let dir = self.root.join(kind.prefix());
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| storage_error(kind.prefix(), e))?;
        }
        info!("Local media root ready at {}", self.root.display());
        Ok(())
    }

    async fn upload(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| storage_error(key, e))?;
        }
        tokio::fs::write(&path, &data).await.map_err(|e| storage_error(key, e))?;
        info!("Stored media {}", key);
        Ok(())
    }

    async fn download(&self, key: &str) -> AppResult<DownloadedFile> {
        let path = self.path_for(key)?;
        let data = match tokio::fs::read(&path).await {
            Ok(data) => Bytes::from(data),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(AppError::StorageNotFound),
            Err(err) => return Err(storage_error(key, err)),
        };
        let content_type = detect_image(&data)
            .map(|image| image.content_type)
            .unwrap_or("application/octet-stream")
            .to_string();
        Ok(DownloadedFile { data, content_type })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed media {}", key);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(key, err)),
        }
    }
}
