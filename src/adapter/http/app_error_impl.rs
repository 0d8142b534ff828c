use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Profile not found")]
    pub error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_)
            | AppError::InvalidPayload(_)
            | AppError::Multipart(_)
            | AppError::RowNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidJson(rejection) => rejection.status(),
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::ProfileNotFound | AppError::StorageNotFound => StatusCode::NOT_FOUND,
            AppError::ProfileAlreadyExists => StatusCode::CONFLICT,
            AppError::ValidationError(_) | AppError::ImageRequired(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::StorageError(_) | AppError::UpdateFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::InvalidCredentials => "Missing or invalid account".to_string(),
            AppError::DatabaseError(_) | AppError::StorageError(_) => {
                error!("Request failed: {}", self);
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rstest::rstest;

    use crate::application::app_error::AppError;

    #[rstest]
    #[case(AppError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(AppError::ProfileNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::ProfileAlreadyExists, StatusCode::CONFLICT)]
    #[case(AppError::StorageNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::InvalidPayload("bad".to_string()), StatusCode::BAD_REQUEST)]
    #[case(AppError::UpdateFailed, StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AppError::StorageError("s3 down".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] error: AppError, #[case] status: StatusCode) {
        assert_eq!(error.into_response().status(), status);
    }

    #[tokio::test]
    async fn test_update_failed_message() {
        let response = AppError::UpdateFailed.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Profile update failed, nothing was saved");
    }
}
