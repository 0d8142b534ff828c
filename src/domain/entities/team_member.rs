use crate::domain::entities::{id::Id, profile::Profile};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub id: Id<TeamMember>,
    pub profile_id: Id<Profile>,
    pub name: String,
    pub photo: Option<String>,
    pub role_title: String,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub credentials: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}
