use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::hero_image::HeroImage;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait HeroImageWriter: Send + Sync {
    async fn insert(&self, row: HeroImage) -> AppResult<Id<HeroImage>>;
    async fn update(&self, row: HeroImage) -> AppResult<Id<HeroImage>>;
    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<HeroImage>) -> AppResult<()>;
}

#[async_trait]
pub trait HeroImageReader: Send + Sync {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<HeroImage>>;
}
