use axum::body::Body;
use axum::extract::Path;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthAccount;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::media::GetMediaDTO;
use crate::application::interactors::media::GetMediaInteractor;

#[utoipa::path(
    get,
    path = "/media/{key}",
    tag = "Media",
    params(("key" = String, Path, description = "Storage key, e.g. hero_images/<profile>_<id>.png")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (
            status = 401,
            description = "Missing or invalid account header",
            body = ErrorResponse,
            example = json!({ "error": "Missing or invalid account" })
        ),
        (
            status = 404,
            description = "No such image",
            body = ErrorResponse,
            example = json!({ "error": "Media not found" })
        )
    ),
    security(("accountHeader" = []))
)]
pub async fn get_media(
    _auth: AuthAccount,
    interactor: GetMediaInteractor,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let file = interactor.execute(GetMediaDTO { key }).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type)
            .map_err(|_| AppError::StorageError("Invalid content type".to_string()))?,
    );
    // Keys are never reused, so a stored image never changes.
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("private, max-age=31536000, immutable"));

    Ok((StatusCode::OK, headers, Body::from(file.data)))
}
