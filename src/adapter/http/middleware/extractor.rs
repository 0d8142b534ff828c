use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};

/// Account that owns the profile being read or edited, as put in place by
/// [`account_middleware`](crate::adapter::http::middleware::account::account_middleware).
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub account_id: String,
}

impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<AuthAccount>()
            .cloned()
            .ok_or(AppError::InvalidCredentials)
    }
}
