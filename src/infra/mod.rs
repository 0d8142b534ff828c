use std::sync::Arc;

use tracing::info;

use crate::adapter::storage::local::LocalStorageClient;
use crate::adapter::storage::s3::S3StorageClient;
use crate::application::interface::storage::StorageClient;
use crate::infra::config::{AppConfig, StorageProvider};
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

pub fn storage_client(config: &AppConfig) -> Arc<dyn StorageClient> {
    match config.storage.provider {
        StorageProvider::S3 => Arc::new(S3StorageClient::new(&config.s3, &config.storage.bucket)),
        StorageProvider::Local => Arc::new(LocalStorageClient::new(&config.storage.local_root)),
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(config).await?;

    let storage = storage_client(config);
    storage.ensure_bucket().await?;
    info!("Media storage ready ({:?})", config.storage.provider);

    Ok(AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    })
}
