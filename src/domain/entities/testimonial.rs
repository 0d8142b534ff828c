use chrono::{DateTime, Utc};

use crate::domain::entities::{id::Id, profile::Profile};

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub id: Id<Testimonial>,
    pub profile_id: Id<Profile>,
    pub client_name: String,
    pub client_photo: Option<String>,
    pub rating: i16,
    pub testimonial_text: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
