use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::storage::{DownloadedFile, StorageClient};
use crate::infra::config::S3Config;

/// Profile media in a single S3-compatible bucket, keyed by media kind.
pub struct S3StorageClient {
    client: Client,
    bucket: String,
}

impl S3StorageClient {
    pub fn new(config: &S3Config, bucket: &str) -> Self {
        let credentials = Credentials::new(&config.access_key, &config.secret_key, None, None, "profile-media");
        let s3_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn ensure_bucket(&self) -> AppResult<()> {
        if self.client.head_bucket().bucket(&self.bucket).send().await.is_ok() {
            return Ok(());
        }

        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                info!("Media bucket '{}' created", self.bucket);
                Ok(())
            }
            Err(SdkError::ServiceError(err)) => match err.err() {
                CreateBucketError::BucketAlreadyExists(_) | CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
                other => {
                    warn!("Failed to create media bucket '{}': {:?}", self.bucket, other);
                    Err(AppError::StorageError(other.to_string()))
                }
            },
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                warn!("S3 upload failed for {}: {:?}", key, e);
                AppError::StorageError(e.to_string())
            })?;

        info!("Stored media s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn download(&self, key: &str) -> AppResult<DownloadedFile> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e {
                SdkError::ServiceError(ref err) if matches!(err.err(), GetObjectError::NoSuchKey(_)) => {
                    AppError::StorageNotFound
                }
                other => {
                    warn!("S3 download failed for {}: {:?}", key, other);
                    AppError::StorageError(other.to_string())
                }
            })?;

        let content_type = response
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = response
            .body
            .collect()
            .await
            .map(|b| b.into_bytes())
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        Ok(DownloadedFile { data, content_type })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                warn!("S3 delete failed for {}: {:?}", key, e);
                AppError::StorageError(e.to_string())
            })?;

        info!("Removed media s3://{}/{}", self.bucket, key);
        Ok(())
    }
}
