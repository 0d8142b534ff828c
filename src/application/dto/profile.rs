use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::application::validation::report::ValidationReport;
use crate::domain::entities::hero_image::HeroImage;
use crate::domain::entities::profile::ProfileAggregate;
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::testimonial::Testimonial;

/// Who is editing. Carried explicitly instead of being looked up from the
/// request.
#[derive(Debug, Clone)]
pub struct ProfileContext {
    pub account_id: String,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub data: Bytes,
}

/// One submitted collection row. Rows without an id are new.
#[derive(Debug, Clone, Default)]
pub struct RowSubmission<F> {
    pub id: Option<String>,
    pub delete: bool,
    pub fields: F,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileFieldsDTO {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub hero_color: Option<String>,
    pub mission_statement: Option<String>,
    pub vision_statement: Option<String>,
    pub about_us: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
    pub terms_conditions_url: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub cancellation_policy_url: Option<String>,
    pub logo: Option<UploadedFile>,
    pub clear_logo: bool,
    pub profile_image: Option<UploadedFile>,
    pub clear_profile_image: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeroImageFieldsDTO {
    pub image: Option<UploadedFile>,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberFieldsDTO {
    pub name: Option<String>,
    pub photo: Option<UploadedFile>,
    pub clear_photo: bool,
    pub role_title: Option<String>,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub credentials: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialFieldsDTO {
    pub client_name: Option<String>,
    pub client_photo: Option<UploadedFile>,
    pub clear_client_photo: bool,
    pub rating: Option<i64>,
    pub testimonial_text: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileSubmissionDTO {
    pub profile: ProfileFieldsDTO,
    pub hero_images: Vec<RowSubmission<HeroImageFieldsDTO>>,
    pub team_members: Vec<RowSubmission<TeamMemberFieldsDTO>>,
    pub testimonials: Vec<RowSubmission<TestimonialFieldsDTO>>,
}

#[derive(Debug, Clone)]
pub struct CreateProfileDTO {
    pub account_id: String,
    pub business_name: String,
    pub business_type: String,
    pub phone: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeroImageDTO {
    pub id: String,
    pub image: String,
    pub caption: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<HeroImage> for HeroImageDTO {
    fn from(row: HeroImage) -> Self {
        Self {
            id: row.id.value.to_string(),
            image: row.image,
            caption: row.caption,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamMemberDTO {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub role_title: String,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub credentials: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<TeamMember> for TeamMemberDTO {
    fn from(row: TeamMember) -> Self {
        Self {
            id: row.id.value.to_string(),
            name: row.name,
            photo: row.photo,
            role_title: row.role_title,
            specialties: row.specialties,
            bio: row.bio,
            credentials: row.credentials,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestimonialDTO {
    pub id: String,
    pub client_name: String,
    pub client_photo: Option<String>,
    pub rating: i16,
    pub testimonial_text: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for TestimonialDTO {
    fn from(row: Testimonial) -> Self {
        Self {
            id: row.id.value.to_string(),
            client_name: row.client_name,
            client_photo: row.client_photo,
            rating: row.rating,
            testimonial_text: row.testimonial_text,
            is_featured: row.is_featured,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDTO {
    pub id: String,
    pub account_id: String,
    pub business_name: String,
    pub business_type: String,
    pub description: Option<String>,
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub logo: Option<String>,
    pub profile_image: Option<String>,
    pub hero_color: String,
    pub mission_statement: Option<String>,
    pub vision_statement: Option<String>,
    pub about_us: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
    pub terms_conditions_url: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub cancellation_policy_url: Option<String>,
    pub hero_images: Vec<HeroImageDTO>,
    pub team_members: Vec<TeamMemberDTO>,
    pub testimonials: Vec<TestimonialDTO>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileAggregate> for ProfileDTO {
    fn from(aggregate: ProfileAggregate) -> Self {
        let profile = aggregate.profile;
        let details = profile.details;
        Self {
            id: profile.id.value.to_string(),
            account_id: profile.account_id.value.to_string(),
            business_name: details.business_name,
            business_type: details.business_type,
            description: details.description,
            phone: details.phone,
            whatsapp_number: details.whatsapp_number,
            business_address: details.business_address,
            city: details.city,
            state: details.state,
            pincode: details.pincode,
            logo: profile.logo,
            profile_image: profile.profile_image,
            hero_color: details.hero_color,
            mission_statement: details.mission_statement,
            vision_statement: details.vision_statement,
            about_us: details.about_us,
            instagram_url: details.social.instagram_url,
            facebook_url: details.social.facebook_url,
            twitter_url: details.social.twitter_url,
            linkedin_url: details.social.linkedin_url,
            youtube_url: details.social.youtube_url,
            terms_conditions_url: details.legal.terms_conditions_url,
            privacy_policy_url: details.legal.privacy_policy_url,
            cancellation_policy_url: details.legal.cancellation_policy_url,
            hero_images: aggregate.hero_images.into_iter().map(Into::into).collect(),
            team_members: aggregate.team_members.into_iter().map(Into::into).collect(),
            testimonials: aggregate.testimonials.into_iter().map(Into::into).collect(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ProfileUpdateOutcome {
    Committed(ProfileDTO),
    Rejected(ValidationReport),
}
