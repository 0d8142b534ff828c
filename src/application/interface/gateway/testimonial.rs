use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::testimonial::Testimonial;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait TestimonialWriter: Send + Sync {
    async fn insert(&self, row: Testimonial) -> AppResult<Id<Testimonial>>;
    async fn update(&self, row: Testimonial) -> AppResult<Id<Testimonial>>;
    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<Testimonial>) -> AppResult<()>;
}

#[async_trait]
pub trait TestimonialReader: Send + Sync {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<Testimonial>>;
}
