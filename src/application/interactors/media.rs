use std::sync::Arc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::media::GetMediaDTO;
use crate::application::interface::storage::{DownloadedFile, StorageClient};
use crate::domain::media::MediaKind;

#[derive(Clone)]
pub struct GetMediaInteractor {
    storage: Arc<dyn StorageClient>,
}

impl GetMediaInteractor {
    pub fn new(storage: Arc<dyn StorageClient>) -> Self {
        Self { storage }
    }

    pub async fn execute(&self, dto: GetMediaDTO) -> AppResult<DownloadedFile> {
        if MediaKind::from_key(&dto.key).is_none() {
            return Err(AppError::StorageNotFound);
        }
        self.storage.download(&dto.key).await
    }
}
