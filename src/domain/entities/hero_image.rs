use crate::domain::entities::{id::Id, profile::Profile};

/// Upper bound on hero images a profile may keep at once.
pub const MAX_HERO_IMAGES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroImage {
    pub id: Id<HeroImage>,
    pub profile_id: Id<Profile>,
    pub image: String,
    pub caption: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl HeroImage {
    pub fn new(
        profile_id: Id<Profile>,
        image: String,
        caption: Option<String>,
        display_order: i32,
        is_active: bool,
    ) -> Self {
        Self {
            id: Id::generate(),
            profile_id,
            image,
            caption,
            display_order,
            is_active,
        }
    }
}
