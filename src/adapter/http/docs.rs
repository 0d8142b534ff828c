use axum::{Json, response::Html};
use utoipa::{
    Modify, OpenApi,
    openapi::{
        OpenApi as OpenApiDoc,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{media, profile},
    schema::profile::{
        CreateProfileRequest, HeroImageResponse, HeroImageRowRequest, ProfileFieldsRequest, ProfileResponse,
        ProfileUpdateForm, ProfileUpdateRequest, ProfileUpdatedResponse, SubmittedForm, TeamMemberResponse,
        TeamMemberRowRequest, TestimonialResponse, TestimonialRowRequest, ValidationFailedResponse,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "accountHeader",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-account-id"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        profile::get_profile,
        profile::setup_profile,
        profile::update_profile,
        media::get_media
    ),
    components(
        schemas(
            ErrorResponse,
            CreateProfileRequest,
            ProfileFieldsRequest,
            HeroImageRowRequest,
            TeamMemberRowRequest,
            TestimonialRowRequest,
            ProfileUpdateRequest,
            ProfileUpdateForm,
            SubmittedForm,
            HeroImageResponse,
            TeamMemberResponse,
            TestimonialResponse,
            ProfileResponse,
            ProfileUpdatedResponse,
            ValidationFailedResponse
        )
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Provider profile API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
