use async_trait::async_trait;
use bytes::Bytes;

use crate::application::app_error::AppResult;

pub struct DownloadedFile {
    pub data: Bytes,
    pub content_type: String,
}

/// Object store for profile media. Keys are produced by `MediaKind::key_for`.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn ensure_bucket(&self) -> AppResult<()>;
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
    async fn download(&self, key: &str) -> AppResult<DownloadedFile>;
    async fn delete(&self, key: &str) -> AppResult<()>;
}
