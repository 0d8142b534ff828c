use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

use crate::adapter::http::middleware::extractor::AuthAccount;
use crate::application::app_error::{AppError, AppResult};
use crate::infra::config::AppConfig;

/// Reads the owning account from the header set by the upstream gateway.
pub async fn account_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let account_id = extract_account_id(&request, &config.account.header_name)?;
    request.extensions_mut().insert(AuthAccount { account_id });
    Ok(next.run(request).await)
}

fn extract_account_id(request: &Request, header_name: &str) -> AppResult<String> {
    let value = request
        .headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .ok_or(AppError::InvalidCredentials)?;

    match Uuid::parse_str(value) {
        Ok(uuid) => Ok(uuid.to_string()),
        Err(_) => {
            warn!("Rejected request with malformed {} header", header_name);
            Err(AppError::InvalidCredentials)
        }
    }
}
