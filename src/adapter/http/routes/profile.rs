use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthAccount;
use crate::adapter::http::schema::profile::{
    CreateProfileRequest, PAYLOAD_PART, ProfileFormData, ProfileResponse, ProfileUpdateForm, ProfileUpdateRequest,
    ProfileUpdatedResponse, ValidationFailedResponse, is_file_part,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{CreateProfileDTO, ProfileContext, ProfileUpdateOutcome, UploadedFile};
use crate::application::interactors::profile::{
    CreateProfileInteractor, GetProfileInteractor, UpdateProfileInteractor,
};
use crate::infra::config::AppConfig;

pub const UPDATED_MESSAGE: &str = "Profile updated successfully!";
pub const VALIDATION_FAILED: &str = "Validation failed";

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile with hero images, team and testimonials", body = ProfileResponse),
        (
            status = 401,
            description = "Missing or invalid account header",
            body = ErrorResponse,
            example = json!({ "error": "Missing or invalid account" })
        ),
        (
            status = 404,
            description = "Account has no profile yet",
            body = ErrorResponse,
            example = json!({ "error": "Profile not found" })
        )
    ),
    security(("accountHeader" = []))
)]
pub async fn get_profile(auth: AuthAccount, interactor: GetProfileInteractor) -> AppResult<impl IntoResponse> {
    let profile = interactor
        .execute(ProfileContext {
            account_id: auth.account_id,
        })
        .await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "Profile",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile set up", body = ProfileResponse),
        (
            status = 401,
            description = "Missing or invalid account header",
            body = ErrorResponse,
            example = json!({ "error": "Missing or invalid account" })
        ),
        (
            status = 409,
            description = "Account already has a profile",
            body = ErrorResponse,
            example = json!({ "error": "Profile already exists" })
        ),
        (status = 422, description = "Invalid fields", body = ErrorResponse)
    ),
    security(("accountHeader" = []))
)]
pub async fn setup_profile(
    auth: AuthAccount,
    interactor: CreateProfileInteractor,
    ValidJson(body): ValidJson<CreateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = interactor
        .execute(CreateProfileDTO {
            account_id: auth.account_id,
            business_name: body.business_name.trim().to_string(),
            business_type: body.business_type.trim().to_string(),
            phone: body.phone.trim().to_string(),
            city: body.city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

async fn read_profile_form(mut multipart: Multipart) -> AppResult<ProfileFormData> {
    let mut payload: Option<ProfileUpdateRequest> = None;
    let mut files = BTreeMap::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PAYLOAD_PART {
            let text = field.text().await?;
            let parsed = serde_json::from_str(&text).map_err(|e| AppError::InvalidPayload(e.to_string()))?;
            payload = Some(parsed);
        } else if is_file_part(&name) {
            let filename = field.file_name().map(str::to_string).filter(|f| !f.is_empty());
            let data = field.bytes().await?;
            // Browsers send an empty part for file inputs left blank.
            if filename.is_none() && data.is_empty() {
                continue;
            }
            files.insert(name, UploadedFile { filename, data });
        } else {
            warn!("Ignoring unexpected multipart field `{}`", name);
        }
    }

    let payload = payload.ok_or_else(|| AppError::InvalidPayload(format!("missing `{}` part", PAYLOAD_PART)))?;
    Ok(ProfileFormData { payload, files })
}

#[utoipa::path(
    put,
    path = "/profile",
    tag = "Profile",
    request_body(
        content_type = "multipart/form-data",
        content = ProfileUpdateForm,
        description = "`payload` JSON (ProfileUpdateRequest) plus image parts named logo, profile_image, \
                       hero_images-{i}-image, team_members-{i}-photo, testimonials-{i}-client_photo"
    ),
    responses(
        (
            status = 303,
            description = "Everything saved; Location points at the profile page",
            body = ProfileUpdatedResponse
        ),
        (
            status = 400,
            description = "Malformed multipart body or payload",
            body = ErrorResponse,
            example = json!({ "error": "Invalid payload: missing `payload` part" })
        ),
        (
            status = 401,
            description = "Missing or invalid account header",
            body = ErrorResponse,
            example = json!({ "error": "Missing or invalid account" })
        ),
        (
            status = 404,
            description = "Account has no profile yet",
            body = ErrorResponse,
            example = json!({ "error": "Profile not found" })
        ),
        (
            status = 422,
            description = "Nothing saved; every failing field is reported",
            body = ValidationFailedResponse
        ),
        (
            status = 500,
            description = "Nothing saved; the transaction was rolled back",
            body = ErrorResponse,
            example = json!({ "error": "Profile update failed, nothing was saved" })
        )
    ),
    security(("accountHeader" = []))
)]
pub async fn update_profile(
    State(config): State<Arc<AppConfig>>,
    auth: AuthAccount,
    interactor: UpdateProfileInteractor,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_profile_form(multipart).await?;
    let submitted = form.submitted();
    let dto = form.into_dto()?;

    let outcome = interactor
        .execute(
            ProfileContext {
                account_id: auth.account_id,
            },
            dto,
        )
        .await?;

    let response = match outcome {
        ProfileUpdateOutcome::Committed(profile) => (
            StatusCode::SEE_OTHER,
            [(LOCATION, config.profile.success_redirect.clone())],
            Json(ProfileUpdatedResponse {
                message: UPDATED_MESSAGE.to_string(),
                profile: profile.into(),
            }),
        )
            .into_response(),
        ProfileUpdateOutcome::Rejected(report) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationFailedResponse {
                error: VALIDATION_FAILED.to_string(),
                errors: report,
                submitted,
            }),
        )
            .into_response(),
    };
    Ok(response)
}
