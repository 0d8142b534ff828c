use std::collections::BTreeMap;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for FieldError {
    fn from(error: &ValidationError) -> Self {
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid value ({})", error.code));
        FieldError::new(error.code.to_string(), message)
    }
}

/// Errors keyed by field name. Ordered so responses are stable.
pub type FieldErrors = BTreeMap<String, Vec<FieldError>>;

pub(super) fn push(errors: &mut FieldErrors, field: &str, error: FieldError) {
    errors.entry(field.to_string()).or_default().push(error);
}

pub(super) fn merge(errors: &mut FieldErrors, result: Result<(), ValidationErrors>) {
    if let Err(validation) = result {
        for (field, field_errors) in validation.field_errors() {
            for error in field_errors {
                push(errors, &field, error.into());
            }
        }
    }
}

/// Outcome for one collection. `rows[i]` belongs to the i-th submitted row,
/// empty when that row is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionReport {
    pub non_field_errors: Vec<FieldError>,
    pub rows: Vec<FieldErrors>,
}

impl CollectionReport {
    pub fn is_empty(&self) -> bool {
        self.non_field_errors.is_empty() && self.rows.iter().all(|row| row.is_empty())
    }

    fn paths(&self, name: &str, out: &mut Vec<String>) {
        if !self.non_field_errors.is_empty() {
            out.push(name.to_string());
        }
        for (index, row) in self.rows.iter().enumerate() {
            out.extend(row.keys().map(|field| format!("{}[{}].{}", name, index, field)));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub profile: FieldErrors,
    pub hero_images: CollectionReport,
    pub team_members: CollectionReport,
    pub testimonials: CollectionReport,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
            && self.hero_images.is_empty()
            && self.team_members.is_empty()
            && self.testimonials.is_empty()
    }

    /// Every failing location, e.g. `profile.phone`, `hero_images[2].image`
    /// or `hero_images` for a collection-wide error.
    pub fn failures(&self) -> Vec<String> {
        let mut out: Vec<String> = self.profile.keys().map(|field| format!("profile.{}", field)).collect();
        self.hero_images.paths("hero_images", &mut out);
        self.team_members.paths("team_members", &mut out);
        self.testimonials.paths("testimonials", &mut out);
        out
    }
}
