use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{self, HeaderName};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::account::account_middleware;
use crate::adapter::http::routes::media::get_media;
use crate::adapter::http::routes::profile::{get_profile, setup_profile, update_profile};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

const METHODS: [http::Method; 3] = [http::Method::GET, http::Method::POST, http::Method::PUT];

fn build_cors(config: &AppConfig) -> CorsLayer {
    let account_header = HeaderName::from_bytes(config.account.header_name.as_bytes())
        .unwrap_or_else(|_| HeaderName::from_static("x-account-id"));
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(METHODS)
            .allow_headers([CONTENT_TYPE, account_header]);
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(METHODS)
        .allow_headers([CONTENT_TYPE, account_header])
        .allow_credentials(true)
}

pub fn profile_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).post(setup_profile).put(update_profile))
        .route("/media/{*key}", get(get_media))
        .route_layer(middleware::from_fn_with_state(state, account_middleware))
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(profile_router(state))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router(state.clone()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.application.body_limit_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
