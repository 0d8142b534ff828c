use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Profile already exists")]
    ProfileAlreadyExists,

    #[error("Row {0} does not belong to this profile")]
    RowNotFound(String),

    #[error("Image required for {0}")]
    ImageRequired(&'static str),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    InvalidJson(#[from] JsonRejection),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Media not found")]
    StorageNotFound,

    #[error("Profile update failed, nothing was saved")]
    UpdateFailed,
}

pub type AppResult<T> = Result<T, AppError>;
