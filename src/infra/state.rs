use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::PgPool;

use crate::adapter::db::gateway::hero_image::HeroImageGateway;
use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::gateway::team_member::TeamMemberGateway;
use crate::adapter::db::gateway::testimonial::TestimonialGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::media::GetMediaInteractor;
use crate::application::interactors::profile::{
    CreateProfileInteractor, GetProfileInteractor, ProfileReaders, ProfileWriters, UpdateProfileInteractor,
};
use crate::application::interface::storage::StorageClient;
use crate::application::validation::UploadLimits;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

/// Every gateway of one request, sharing a single session.
struct Gateways {
    session: SqlxSession,
    profile: Arc<ProfileGateway>,
    hero_images: Arc<HeroImageGateway>,
    team_members: Arc<TeamMemberGateway>,
    testimonials: Arc<TestimonialGateway>,
}

impl Gateways {
    fn new(state: &AppState) -> Self {
        let session = SqlxSession::new(state.pool.clone());
        Self {
            profile: Arc::new(ProfileGateway::new(session.clone())),
            hero_images: Arc::new(HeroImageGateway::new(session.clone())),
            team_members: Arc::new(TeamMemberGateway::new(session.clone())),
            testimonials: Arc::new(TestimonialGateway::new(session.clone())),
            session,
        }
    }

    fn readers(&self) -> ProfileReaders {
        ProfileReaders {
            profile: self.profile.clone(),
            hero_images: self.hero_images.clone(),
            team_members: self.team_members.clone(),
            testimonials: self.testimonials.clone(),
        }
    }

    fn writers(&self) -> ProfileWriters {
        ProfileWriters {
            profile: self.profile.clone(),
            hero_images: self.hero_images.clone(),
            team_members: self.team_members.clone(),
            testimonials: self.testimonials.clone(),
        }
    }
}

// GetProfileInteractor
#[async_trait]
impl FromAppState for GetProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetProfileInteractor::new(Gateways::new(state).readers()))
    }
}

impl<S> FromRequestParts<S> for GetProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetProfileInteractor::from_app_state(&app_state).await
    }
}

// CreateProfileInteractor
#[async_trait]
impl FromAppState for CreateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let gateways = Gateways::new(state);

        Ok(CreateProfileInteractor::new(
            Arc::new(gateways.session.clone()),
            gateways.profile.clone(),
            gateways.profile,
        ))
    }
}

impl<S> FromRequestParts<S> for CreateProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        CreateProfileInteractor::from_app_state(&app_state).await
    }
}

// UpdateProfileInteractor
#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let gateways = Gateways::new(state);
        let limits = UploadLimits {
            max_image_bytes: state.config.storage.max_image_bytes,
        };

        Ok(UpdateProfileInteractor::new(
            Arc::new(gateways.session.clone()),
            gateways.readers(),
            gateways.writers(),
            state.storage.clone(),
            limits,
        ))
    }
}

impl<S> FromRequestParts<S> for UpdateProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        UpdateProfileInteractor::from_app_state(&app_state).await
    }
}

// GetMediaInteractor
#[async_trait]
impl FromAppState for GetMediaInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetMediaInteractor::new(state.storage.clone()))
    }
}

impl<S> FromRequestParts<S> for GetMediaInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetMediaInteractor::from_app_state(&app_state).await
    }
}
