use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait TeamMemberWriter: Send + Sync {
    async fn insert(&self, row: TeamMember) -> AppResult<Id<TeamMember>>;
    async fn update(&self, row: TeamMember) -> AppResult<Id<TeamMember>>;
    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<TeamMember>) -> AppResult<()>;
}

#[async_trait]
pub trait TeamMemberReader: Send + Sync {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<TeamMember>>;
}
