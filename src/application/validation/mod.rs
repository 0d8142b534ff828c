//! Pure validation of a profile submission.
//!
//! [`validate`] either yields a [`ValidatedSubmission`] describing exactly
//! which rows to create, update and delete, or a [`ValidationReport`] naming
//! every failing field. It never touches storage or the database; the current
//! persisted state comes in as a [`ProfileAggregate`].

mod fields;
pub mod report;

use std::collections::HashSet;

use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::profile::{
    HeroImageFieldsDTO, ProfileFieldsDTO, ProfileSubmissionDTO, RowSubmission, TeamMemberFieldsDTO,
    TestimonialFieldsDTO, UploadedFile,
};
use crate::application::validation::fields::{
    HeroImageForm, ProfileForm, REQUIRED, TeamMemberForm, TestimonialForm, check_image, clean,
};
use crate::application::validation::report::{CollectionReport, FieldError, FieldErrors, ValidationReport, merge, push};
use crate::domain::entities::hero_image::{HeroImage, MAX_HERO_IMAGES};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{DEFAULT_HERO_COLOR, LegalLinks, ProfileAggregate, ProfileDetails, SocialLinks};
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::testimonial::Testimonial;
use crate::domain::media::DetectedImage;

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct PendingImage {
    pub data: Bytes,
    pub image: DetectedImage,
}

#[derive(Debug, Clone)]
pub enum ImageChange {
    Keep,
    Clear,
    Replace(PendingImage),
}

#[derive(Debug, Clone)]
pub enum RowChange<E, D> {
    Create(D),
    Update(Id<E>, D),
    Delete(Id<E>),
}

#[derive(Debug, Clone)]
pub struct HeroImageDraft {
    pub image: ImageChange,
    pub caption: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct TeamMemberDraft {
    pub name: String,
    pub photo: ImageChange,
    pub role_title: String,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub credentials: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct TestimonialDraft {
    pub client_name: String,
    pub client_photo: ImageChange,
    pub rating: i16,
    pub testimonial_text: String,
    pub is_featured: bool,
    pub is_active: bool,
}

/// A submission that passed every rule. Only [`validate`] builds one, so the
/// commit phase cannot be handed unchecked input.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    details: ProfileDetails,
    logo: ImageChange,
    profile_image: ImageChange,
    hero_images: Vec<RowChange<HeroImage, HeroImageDraft>>,
    team_members: Vec<RowChange<TeamMember, TeamMemberDraft>>,
    testimonials: Vec<RowChange<Testimonial, TestimonialDraft>>,
}

impl ValidatedSubmission {
    pub fn details(&self) -> &ProfileDetails {
        &self.details
    }

    pub fn logo(&self) -> &ImageChange {
        &self.logo
    }

    pub fn profile_image(&self) -> &ImageChange {
        &self.profile_image
    }

    pub fn hero_images(&self) -> &[RowChange<HeroImage, HeroImageDraft>] {
        &self.hero_images
    }

    pub fn team_members(&self) -> &[RowChange<TeamMember, TeamMemberDraft>] {
        &self.team_members
    }

    pub fn testimonials(&self) -> &[RowChange<Testimonial, TestimonialDraft>] {
        &self.testimonials
    }
}

pub fn validate(
    submission: ProfileSubmissionDTO,
    current: &ProfileAggregate,
    limits: &UploadLimits,
) -> Result<ValidatedSubmission, ValidationReport> {
    let mut report = ValidationReport::default();

    let (details, logo, profile_image) = validate_profile(submission.profile, limits, &mut report.profile);

    let (hero_images, live_heroes) =
        validate_rows(submission.hero_images, &current.hero_images, limits, &mut report.hero_images);
    let (team_members, _) =
        validate_rows(submission.team_members, &current.team_members, limits, &mut report.team_members);
    let (testimonials, _) =
        validate_rows(submission.testimonials, &current.testimonials, limits, &mut report.testimonials);

    if live_heroes > MAX_HERO_IMAGES {
        report.hero_images.non_field_errors.push(FieldError::new(
            "too_many_hero_images",
            format!("You can have at most {} hero images.", MAX_HERO_IMAGES),
        ));
    }

    if !report.is_empty() {
        return Err(report);
    }

    match details {
        Some(details) => Ok(ValidatedSubmission {
            details,
            logo,
            profile_image,
            hero_images,
            team_members,
            testimonials,
        }),
        // validate_profile only returns None alongside a field error
        None => Err(report),
    }
}

fn image_change(
    upload: Option<UploadedFile>,
    clear: bool,
    field: &str,
    limits: &UploadLimits,
    errors: &mut FieldErrors,
) -> ImageChange {
    match upload {
        Some(_) if clear => {
            push(
                errors,
                field,
                FieldError::new(
                    "contradiction",
                    "Please either submit a file or check the clear checkbox, not both.",
                ),
            );
            ImageChange::Keep
        }
        Some(upload) => match check_image(&upload, limits.max_image_bytes) {
            Ok(image) => ImageChange::Replace(PendingImage {
                data: upload.data,
                image,
            }),
            Err(error) => {
                push(errors, field, error);
                ImageChange::Keep
            }
        },
        None if clear => ImageChange::Clear,
        None => ImageChange::Keep,
    }
}

fn validate_profile(
    fields: ProfileFieldsDTO,
    limits: &UploadLimits,
    errors: &mut FieldErrors,
) -> (Option<ProfileDetails>, ImageChange, ImageChange) {
    let form = ProfileForm {
        business_name: clean(fields.business_name),
        business_type: clean(fields.business_type),
        phone: clean(fields.phone),
        whatsapp_number: clean(fields.whatsapp_number),
        city: clean(fields.city),
        state: clean(fields.state),
        pincode: clean(fields.pincode),
        hero_color: clean(fields.hero_color),
        instagram_url: clean(fields.instagram_url),
        facebook_url: clean(fields.facebook_url),
        twitter_url: clean(fields.twitter_url),
        linkedin_url: clean(fields.linkedin_url),
        youtube_url: clean(fields.youtube_url),
        terms_conditions_url: clean(fields.terms_conditions_url),
        privacy_policy_url: clean(fields.privacy_policy_url),
        cancellation_policy_url: clean(fields.cancellation_policy_url),
    };
    merge(errors, form.validate());

    let logo = image_change(fields.logo, fields.clear_logo, "logo", limits, errors);
    let profile_image = image_change(
        fields.profile_image,
        fields.clear_profile_image,
        "profile_image",
        limits,
        errors,
    );

    let details = match (form.business_name, form.business_type, form.phone) {
        (Some(business_name), Some(business_type), Some(phone)) => Some(ProfileDetails {
            business_name,
            business_type,
            description: clean(fields.description),
            phone,
            whatsapp_number: form.whatsapp_number,
            business_address: clean(fields.business_address),
            city: form.city,
            state: form.state,
            pincode: form.pincode,
            hero_color: form.hero_color.unwrap_or_else(|| DEFAULT_HERO_COLOR.to_string()),
            mission_statement: clean(fields.mission_statement),
            vision_statement: clean(fields.vision_statement),
            about_us: clean(fields.about_us),
            social: SocialLinks {
                instagram_url: form.instagram_url,
                facebook_url: form.facebook_url,
                twitter_url: form.twitter_url,
                linkedin_url: form.linkedin_url,
                youtube_url: form.youtube_url,
            },
            legal: LegalLinks {
                terms_conditions_url: form.terms_conditions_url,
                privacy_policy_url: form.privacy_policy_url,
                cancellation_policy_url: form.cancellation_policy_url,
            },
        }),
        _ => None,
    };

    (details, logo, profile_image)
}

/// Per-entity row rules. `existing` is the persisted row being edited, if any.
trait RowForm: Sized {
    type Entity;
    type Draft;

    fn entity_id(entity: &Self::Entity) -> &Id<Self::Entity>;
    fn is_blank(&self) -> bool;
    fn clean(self, existing: Option<&Self::Entity>, limits: &UploadLimits, errors: &mut FieldErrors) -> Option<Self::Draft>;
}

/// Validates one collection. Returns the row changes and how many rows the
/// collection will hold afterwards: submitted rows that are neither empty nor
/// deleted, plus persisted rows the submission left untouched.
fn validate_rows<F: RowForm>(
    rows: Vec<RowSubmission<F>>,
    existing: &[F::Entity],
    limits: &UploadLimits,
    report: &mut CollectionReport,
) -> (Vec<RowChange<F::Entity, F::Draft>>, usize) {
    let mut changes = Vec::new();
    let mut live = 0;
    let mut seen: HashSet<Uuid> = HashSet::new();

    for row in rows {
        let mut errors = FieldErrors::new();

        let current = match clean(row.id) {
            None => None,
            Some(raw) => match lookup::<F>(&raw, existing, &mut seen) {
                Ok(entity) => Some(entity),
                Err(error) => {
                    push(&mut errors, "id", error);
                    report.rows.push(errors);
                    continue;
                }
            },
        };

        if row.delete {
            if let Some(entity) = current {
                changes.push(RowChange::Delete(*F::entity_id(entity)));
            }
            report.rows.push(errors);
            continue;
        }

        if current.is_none() && row.fields.is_blank() {
            report.rows.push(errors);
            continue;
        }

        live += 1;
        if let Some(draft) = row.fields.clean(current, limits, &mut errors) {
            if errors.is_empty() {
                changes.push(match current {
                    Some(entity) => RowChange::Update(*F::entity_id(entity), draft),
                    None => RowChange::Create(draft),
                });
            }
        }
        report.rows.push(errors);
    }

    let untouched = existing
        .iter()
        .filter(|entity| !seen.contains(&F::entity_id(entity).value))
        .count();
    (changes, live + untouched)
}

fn lookup<'a, F: RowForm>(
    raw: &str,
    existing: &'a [F::Entity],
    seen: &mut HashSet<Uuid>,
) -> Result<&'a F::Entity, FieldError> {
    let invalid = || {
        FieldError::new(
            "invalid_choice",
            "Select a valid choice. That choice is not one of the available choices.",
        )
    };
    let id = Id::<F::Entity>::try_from(raw).map_err(|_| invalid())?;
    if !seen.insert(id.value) {
        return Err(FieldError::new("duplicate", "This row was submitted more than once."));
    }
    existing
        .iter()
        .find(|entity| *F::entity_id(entity) == id)
        .ok_or_else(invalid)
}

impl RowForm for HeroImageFieldsDTO {
    type Entity = HeroImage;
    type Draft = HeroImageDraft;

    fn entity_id(entity: &HeroImage) -> &Id<HeroImage> {
        &entity.id
    }

    fn is_blank(&self) -> bool {
        self.image.is_none() && clean(self.caption.clone()).is_none() && self.display_order.is_none()
    }

    fn clean(self, existing: Option<&HeroImage>, limits: &UploadLimits, errors: &mut FieldErrors) -> Option<HeroImageDraft> {
        let form = HeroImageForm {
            caption: clean(self.caption),
            display_order: self.display_order.unwrap_or(0),
        };
        merge(errors, form.validate());

        let image = match (self.image, existing) {
            (Some(upload), _) => image_change(Some(upload), false, "image", limits, errors),
            (None, Some(_)) => ImageChange::Keep,
            (None, None) => {
                push(errors, "image", FieldError::new("required", REQUIRED));
                ImageChange::Keep
            }
        };

        Some(HeroImageDraft {
            image,
            caption: form.caption,
            display_order: form.display_order,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

impl RowForm for TeamMemberFieldsDTO {
    type Entity = TeamMember;
    type Draft = TeamMemberDraft;

    fn entity_id(entity: &TeamMember) -> &Id<TeamMember> {
        &entity.id
    }

    fn is_blank(&self) -> bool {
        self.photo.is_none()
            && self.display_order.is_none()
            && [&self.name, &self.role_title, &self.specialties, &self.bio, &self.credentials]
                .into_iter()
                .all(|value| clean(value.clone()).is_none())
    }

    fn clean(self, _existing: Option<&TeamMember>, limits: &UploadLimits, errors: &mut FieldErrors) -> Option<TeamMemberDraft> {
        let form = TeamMemberForm {
            name: clean(self.name),
            role_title: clean(self.role_title),
            display_order: self.display_order.unwrap_or(0),
        };
        merge(errors, form.validate());
        let photo = image_change(self.photo, self.clear_photo, "photo", limits, errors);

        Some(TeamMemberDraft {
            name: form.name?,
            photo,
            role_title: form.role_title?,
            specialties: clean(self.specialties),
            bio: clean(self.bio),
            credentials: clean(self.credentials),
            display_order: form.display_order,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

impl RowForm for TestimonialFieldsDTO {
    type Entity = Testimonial;
    type Draft = TestimonialDraft;

    fn entity_id(entity: &Testimonial) -> &Id<Testimonial> {
        &entity.id
    }

    fn is_blank(&self) -> bool {
        self.client_photo.is_none()
            && self.rating.is_none()
            && clean(self.client_name.clone()).is_none()
            && clean(self.testimonial_text.clone()).is_none()
    }

    fn clean(
        self,
        _existing: Option<&Testimonial>,
        limits: &UploadLimits,
        errors: &mut FieldErrors,
    ) -> Option<TestimonialDraft> {
        let form = TestimonialForm {
            client_name: clean(self.client_name),
            rating: self.rating,
            testimonial_text: clean(self.testimonial_text),
        };
        merge(errors, form.validate());
        let client_photo = image_change(
            self.client_photo,
            self.clear_client_photo,
            "client_photo",
            limits,
            errors,
        );

        Some(TestimonialDraft {
            client_name: form.client_name?,
            client_photo,
            rating: i16::try_from(form.rating?).ok()?,
            testimonial_text: form.testimonial_text?,
            is_featured: self.is_featured.unwrap_or(false),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}
