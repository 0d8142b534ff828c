use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{
    HeroImageDTO, HeroImageFieldsDTO, ProfileDTO, ProfileFieldsDTO, ProfileSubmissionDTO, RowSubmission,
    TeamMemberDTO, TeamMemberFieldsDTO, TestimonialDTO, TestimonialFieldsDTO, UploadedFile,
};
use crate::application::validation::report::ValidationReport;

pub const PAYLOAD_PART: &str = "payload";
pub const LOGO_PART: &str = "logo";
pub const PROFILE_IMAGE_PART: &str = "profile_image";

/// Path under which stored media is served.
pub fn media_url(key: &str) -> String {
    format!("/media/{}", key)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileFieldsRequest {
    #[schema(example = "Acme Spa")]
    pub business_name: Option<String>,
    #[schema(example = "Wellness")]
    pub business_type: Option<String>,
    pub description: Option<String>,
    #[schema(example = "5551234567")]
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[schema(example = "#4f46e5")]
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
    pub clear_logo: bool,
    pub clear_profile_image: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HeroImageRowRequest {
    /// Id of an existing row; absent for new rows.
    pub id: Option<String>,
    pub delete: bool,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TeamMemberRowRequest {
    pub id: Option<String>,
    pub delete: bool,
    pub name: Option<String>,
    pub role_title: Option<String>,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub credentials: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub clear_photo: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TestimonialRowRequest {
    pub id: Option<String>,
    pub delete: bool,
    pub client_name: Option<String>,
    #[schema(example = 5)]
    pub rating: Option<i64>,
    pub testimonial_text: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub clear_client_photo: bool,
}

/// JSON carried in the `payload` part of a profile update. Images travel as
/// separate file parts: `logo`, `profile_image`, `hero_images-{i}-image`,
/// `team_members-{i}-photo` and `testimonials-{i}-client_photo`, where `i`
/// indexes the matching row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
#[schema(example = json!({
    "profile": {
        "business_name": "Acme Spa",
        "business_type": "Wellness",
        "phone": "5551234567"
    },
    "hero_images": [{ "caption": "Lobby", "display_order": 0 }],
    "team_members": [],
    "testimonials": [{ "client_name": "Jane", "rating": 5, "testimonial_text": "Great!" }]
}))]
pub struct ProfileUpdateRequest {
    pub profile: ProfileFieldsRequest,
    pub hero_images: Vec<HeroImageRowRequest>,
    pub team_members: Vec<TeamMemberRowRequest>,
    pub testimonials: Vec<TestimonialRowRequest>,
}

/// Multipart body of `PUT /profile`, documented for the API description only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProfileUpdateForm {
    #[schema(value_type = String, example = "{\"profile\":{\"business_name\":\"Acme Spa\"}}")]
    pub payload: String,
    #[schema(value_type = String, format = Binary, required = false)]
    pub logo: Option<Vec<u8>>,
    #[schema(value_type = String, format = Binary, required = false)]
    pub profile_image: Option<Vec<u8>>,
}

/// A parsed multipart update: the JSON payload plus file parts by name.
#[derive(Debug, Default)]
pub struct ProfileFormData {
    pub payload: ProfileUpdateRequest,
    pub files: BTreeMap<String, UploadedFile>,
}

/// What the client sent, returned with validation failures so the form can be
/// redisplayed. Files are echoed by name only.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmittedForm {
    #[serde(flatten)]
    pub payload: ProfileUpdateRequest,
    #[schema(example = json!({ "hero_images-0-image": "lobby.png" }))]
    pub files: BTreeMap<String, String>,
}

enum FilePart {
    Logo,
    ProfileImage,
    HeroImage(usize),
    TeamPhoto(usize),
    TestimonialPhoto(usize),
}

impl FilePart {
    fn parse(name: &str) -> Option<FilePart> {
        match name {
            LOGO_PART => return Some(FilePart::Logo),
            PROFILE_IMAGE_PART => return Some(FilePart::ProfileImage),
            _ => {}
        }
        let (prefix, rest) = name.split_once('-')?;
        let (index, field) = rest.split_once('-')?;
        let index: usize = index.parse().ok()?;
        match (prefix, field) {
            ("hero_images", "image") => Some(FilePart::HeroImage(index)),
            ("team_members", "photo") => Some(FilePart::TeamPhoto(index)),
            ("testimonials", "client_photo") => Some(FilePart::TestimonialPhoto(index)),
            _ => None,
        }
    }
}

/// Whether a multipart part name is one of the accepted image fields.
pub fn is_file_part(name: &str) -> bool {
    FilePart::parse(name).is_some()
}

fn attach<'a, T>(rows: &'a mut [T], index: usize, name: &str) -> AppResult<&'a mut T> {
    rows.get_mut(index)
        .ok_or_else(|| AppError::InvalidPayload(format!("file part `{}` has no matching row", name)))
}

impl ProfileFormData {
    pub fn submitted(&self) -> SubmittedForm {
        SubmittedForm {
            payload: self.payload.clone(),
            files: self
                .files
                .iter()
                .map(|(name, file)| (name.clone(), file.filename.clone().unwrap_or_default()))
                .collect(),
        }
    }

    pub fn into_dto(self) -> AppResult<ProfileSubmissionDTO> {
        let ProfileUpdateRequest {
            profile,
            hero_images,
            team_members,
            testimonials,
        } = self.payload;

        let mut dto = ProfileSubmissionDTO {
            profile: ProfileFieldsDTO {
                business_name: profile.business_name,
                business_type: profile.business_type,
                description: profile.description,
                phone: profile.phone,
                whatsapp_number: profile.whatsapp_number,
                business_address: profile.business_address,
                city: profile.city,
                state: profile.state,
                pincode: profile.pincode,
                hero_color: profile.hero_color,
                mission_statement: profile.mission_statement,
                vision_statement: profile.vision_statement,
                about_us: profile.about_us,
                instagram_url: profile.instagram_url,
                facebook_url: profile.facebook_url,
                twitter_url: profile.twitter_url,
                linkedin_url: profile.linkedin_url,
                youtube_url: profile.youtube_url,
                terms_conditions_url: profile.terms_conditions_url,
                privacy_policy_url: profile.privacy_policy_url,
                cancellation_policy_url: profile.cancellation_policy_url,
                logo: None,
                clear_logo: profile.clear_logo,
                profile_image: None,
                clear_profile_image: profile.clear_profile_image,
            },
            hero_images: hero_images
                .into_iter()
                .map(|row| RowSubmission {
                    id: row.id,
                    delete: row.delete,
                    fields: HeroImageFieldsDTO {
                        image: None,
                        caption: row.caption,
                        display_order: row.display_order,
                        is_active: row.is_active,
                    },
                })
                .collect(),
            team_members: team_members
                .into_iter()
                .map(|row| RowSubmission {
                    id: row.id,
                    delete: row.delete,
                    fields: TeamMemberFieldsDTO {
                        name: row.name,
                        photo: None,
                        clear_photo: row.clear_photo,
                        role_title: row.role_title,
                        specialties: row.specialties,
                        bio: row.bio,
                        credentials: row.credentials,
                        display_order: row.display_order,
                        is_active: row.is_active,
                    },
                })
                .collect(),
            testimonials: testimonials
                .into_iter()
                .map(|row| RowSubmission {
                    id: row.id,
                    delete: row.delete,
                    fields: TestimonialFieldsDTO {
                        client_name: row.client_name,
                        client_photo: None,
                        clear_client_photo: row.clear_client_photo,
                        rating: row.rating,
                        testimonial_text: row.testimonial_text,
                        is_featured: row.is_featured,
                        is_active: row.is_active,
                    },
                })
                .collect(),
        };

        for (name, file) in self.files {
            let part = FilePart::parse(&name)
                .ok_or_else(|| AppError::InvalidPayload(format!("unexpected file part `{}`", name)))?;
            match part {
                FilePart::Logo => dto.profile.logo = Some(file),
                FilePart::ProfileImage => dto.profile.profile_image = Some(file),
                FilePart::HeroImage(i) => attach(&mut dto.hero_images, i, &name)?.fields.image = Some(file),
                FilePart::TeamPhoto(i) => attach(&mut dto.team_members, i, &name)?.fields.photo = Some(file),
                FilePart::TestimonialPhoto(i) => {
                    attach(&mut dto.testimonials, i, &name)?.fields.client_photo = Some(file)
                }
            }
        }

        Ok(dto)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("This field is required.".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "business_name": "Acme Spa",
    "business_type": "Wellness",
    "phone": "5551234567",
    "city": "Pune"
}))]
pub struct CreateProfileRequest {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub business_name: String,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub business_type: String,
    #[validate(custom(function = "not_blank"), length(max = 15))]
    pub phone: String,
    #[validate(length(max = 100))]
    pub city: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HeroImageResponse {
    pub id: String,
    #[schema(example = "/media/hero_images/0190a5a4_0190a5a5.png")]
    pub image: String,
    pub caption: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<HeroImageDTO> for HeroImageResponse {
    fn from(row: HeroImageDTO) -> Self {
        Self {
            id: row.id,
            image: media_url(&row.image),
            caption: row.caption,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeamMemberResponse {
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

impl From<TeamMemberDTO> for TeamMemberResponse {
    fn from(row: TeamMemberDTO) -> Self {
        Self {
            id: row.id,
            name: row.name,
            photo: row.photo.as_deref().map(media_url),
            role_title: row.role_title,
            specialties: row.specialties,
            bio: row.bio,
            credentials: row.credentials,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialResponse {
    pub id: String,
    pub client_name: String,
    pub client_photo: Option<String>,
    #[schema(example = 5)]
    pub rating: i16,
    pub testimonial_text: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TestimonialDTO> for TestimonialResponse {
    fn from(row: TestimonialDTO) -> Self {
        Self {
            id: row.id,
            client_name: row.client_name,
            client_photo: row.client_photo.as_deref().map(media_url),
            rating: row.rating,
            testimonial_text: row.testimonial_text,
            is_featured: row.is_featured,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "019c47ec-183d-744e-b11d-cd409015bf13")]
    pub id: String,
    pub account_id: String,
    #[schema(example = "Acme Spa")]
    pub business_name: String,
    #[schema(example = "Wellness")]
    pub business_type: String,
    pub description: Option<String>,
    #[schema(example = "5551234567")]
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub logo: Option<String>,
    pub profile_image: Option<String>,
    #[schema(example = "#4f46e5")]
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
    pub hero_images: Vec<HeroImageResponse>,
    pub team_members: Vec<TeamMemberResponse>,
    pub testimonials: Vec<TestimonialResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDTO> for ProfileResponse {
    fn from(dto: ProfileDTO) -> Self {
        Self {
            id: dto.id,
            account_id: dto.account_id,
            business_name: dto.business_name,
            business_type: dto.business_type,
            description: dto.description,
            phone: dto.phone,
            whatsapp_number: dto.whatsapp_number,
            business_address: dto.business_address,
            city: dto.city,
            state: dto.state,
            pincode: dto.pincode,
            logo: dto.logo.as_deref().map(media_url),
            profile_image: dto.profile_image.as_deref().map(media_url),
            hero_color: dto.hero_color,
            mission_statement: dto.mission_statement,
            vision_statement: dto.vision_statement,
            about_us: dto.about_us,
            instagram_url: dto.instagram_url,
            facebook_url: dto.facebook_url,
            twitter_url: dto.twitter_url,
            linkedin_url: dto.linkedin_url,
            youtube_url: dto.youtube_url,
            terms_conditions_url: dto.terms_conditions_url,
            privacy_policy_url: dto.privacy_policy_url,
            cancellation_policy_url: dto.cancellation_policy_url,
            hero_images: dto.hero_images.into_iter().map(Into::into).collect(),
            team_members: dto.team_members.into_iter().map(Into::into).collect(),
            testimonials: dto.testimonials.into_iter().map(Into::into).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    #[schema(example = "Profile updated successfully!")]
    pub message: String,
    pub profile: ProfileResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationFailedResponse {
    #[schema(example = "Validation failed")]
    pub error: String,
    #[schema(value_type = Object, example = json!({
        "profile": { "phone": [{ "code": "required", "message": "This field is required." }] },
        "hero_images": { "non_field_errors": [], "rows": [] },
        "team_members": { "non_field_errors": [], "rows": [] },
        "testimonials": { "non_field_errors": [], "rows": [] }
    }))]
    pub errors: ValidationReport,
    pub submitted: SubmittedForm,
}
