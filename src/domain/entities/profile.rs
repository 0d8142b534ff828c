use chrono::{DateTime, Utc};

use crate::domain::entities::{
    account::Account, hero_image::HeroImage, id::Id, team_member::TeamMember, testimonial::Testimonial,
};

pub const DEFAULT_HERO_COLOR: &str = "#4f46e5";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialLinks {
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegalLinks {
    pub terms_conditions_url: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub cancellation_policy_url: Option<String>,
}

/// Editable text fields of a profile. Images are tracked separately on
/// [`Profile`] because they go through storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetails {
    pub business_name: String,
    pub business_type: String,
    pub description: Option<String>,
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub hero_color: String,
    pub mission_statement: Option<String>,
    pub vision_statement: Option<String>,
    pub about_us: Option<String>,
    pub social: SocialLinks,
    pub legal: LegalLinks,
}

impl ProfileDetails {
    pub fn new(business_name: String, business_type: String, phone: String, city: Option<String>) -> Self {
        Self {
            business_name,
            business_type,
            description: None,
            phone,
            whatsapp_number: None,
            business_address: None,
            city,
            state: None,
            pincode: None,
            hero_color: DEFAULT_HERO_COLOR.to_string(),
            mission_statement: None,
            vision_statement: None,
            about_us: None,
            social: SocialLinks::default(),
            legal: LegalLinks::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Id<Profile>,
    pub account_id: Id<Account>,
    pub details: ProfileDetails,
    pub logo: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(account_id: Id<Account>, details: ProfileDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            account_id,
            details,
            logo: None,
            profile_image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A profile together with every child row it owns, as currently persisted.
#[derive(Debug, Clone)]
pub struct ProfileAggregate {
    pub profile: Profile,
    pub hero_images: Vec<HeroImage>,
    pub team_members: Vec<TeamMember>,
    pub testimonials: Vec<Testimonial>,
}

impl ProfileAggregate {
    pub fn empty(profile: Profile) -> Self {
        Self {
            profile,
            hero_images: Vec::new(),
            team_members: Vec::new(),
            testimonials: Vec::new(),
        }
    }
}
