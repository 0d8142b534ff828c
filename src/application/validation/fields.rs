use url::Url;
use validator::{Validate, ValidationError};

use crate::application::dto::profile::UploadedFile;
use crate::application::validation::report::FieldError;
use crate::domain::entities::testimonial::{MAX_RATING, MIN_RATING};
use crate::domain::media::{DetectedImage, detect_image};

pub(super) const REQUIRED: &str = "This field is required.";

/// Trims and drops blank values, so "" and "   " mean "not provided".
pub(super) fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        return Ok(());
    }
    Err(ValidationError::new("invalid_color").with_message("Enter a color as #RRGGBB.".into()))
}

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Absolute `scheme://host...` URL with an http(s) or ftp(s) scheme.
fn web_url(value: &str) -> Result<(), ValidationError> {
    // The parser repairs `ftp:/x` into `ftp://x/`, so the separator is checked on the raw input.
    let has_authority = value
        .split_once("://")
        .is_some_and(|(scheme, _)| URL_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)));
    let valid = has_authority
        && Url::parse(value).is_ok_and(|url| {
            URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|host| !host.is_empty())
        });
    if valid {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message("Enter a valid URL.".into()))
}

fn rating_in_range(value: i64) -> Result<(), ValidationError> {
    if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new("range").with_message(
        format!("Ensure this value is between {} and {}.", MIN_RATING, MAX_RATING).into(),
    ))
}

#[derive(Debug, Validate)]
pub(super) struct ProfileForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub business_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 50, message = "Ensure this value has at most 50 characters.")
    )]
    pub business_type: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 15, message = "Ensure this value has at most 15 characters.")
    )]
    pub phone: Option<String>,
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub whatsapp_number: Option<String>,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub state: Option<String>,
    #[validate(length(max = 10, message = "Ensure this value has at most 10 characters."))]
    pub pincode: Option<String>,
    #[validate(custom(function = "hex_color"))]
    pub hero_color: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub instagram_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub facebook_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub twitter_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub linkedin_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub youtube_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub terms_conditions_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub privacy_policy_url: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub cancellation_policy_url: Option<String>,
}

#[derive(Debug, Validate)]
pub(super) struct HeroImageForm {
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub caption: Option<String>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub display_order: i32,
}

#[derive(Debug, Validate)]
pub(super) struct TeamMemberForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub role_title: Option<String>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub display_order: i32,
}

#[derive(Debug, Validate)]
pub(super) struct TestimonialForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub client_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "rating_in_range")
    )]
    pub rating: Option<i64>,
    #[validate(required(message = "This field is required."))]
    pub testimonial_text: Option<String>,
}

/// Checks an upload is a supported raster image within the size limit.
pub(super) fn check_image(upload: &UploadedFile, max_bytes: usize) -> Result<DetectedImage, FieldError> {
    if upload.data.is_empty() {
        return Err(FieldError::new("empty", "The submitted file is empty."));
    }
    if upload.data.len() > max_bytes {
        return Err(FieldError::new(
            "file_too_large",
            format!("Ensure this file is at most {} bytes.", max_bytes),
        ));
    }
    detect_image(&upload.data).ok_or_else(|| {
        FieldError::new(
            "invalid_image",
            "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
        )
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use rstest::rstest;
    use validator::Validate;

    use crate::application::dto::profile::UploadedFile;
    use crate::application::validation::fields::{TestimonialForm, check_image, clean, hex_color, web_url};

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("  Acme Spa "), Some("Acme Spa"))]
    fn test_clean(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(clean(input.map(String::from)).as_deref(), expected);
    }

    #[rstest]
    #[case("#4f46e5", true)]
    #[case("#FFFFFF", true)]
    #[case("4f46e5", false)]
    #[case("#4f46e", false)]
    #[case("#zzzzzz", false)]
    fn test_hex_color(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(hex_color(value).is_ok(), valid);
    }

    #[rstest]
    #[case("https://instagram.com/acme", true)]
    #[case("http://example.com/terms", true)]
    #[case("ftp://files.example.com/menu.pdf", true)]
    #[case("javascript:alert(1)", false)]
    #[case("mailto:x@y.z", false)]
    #[case("foo:bar", false)]
    #[case("ftp:/x", false)]
    #[case("https://", false)]
    fn test_web_url(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(web_url(value).is_ok(), valid);
    }

    #[rstest]
    #[case(Some(0), false)]
    #[case(Some(1), true)]
    #[case(Some(5), true)]
    #[case(Some(6), false)]
    #[case(None, false)]
    fn test_testimonial_rating_bounds(#[case] rating: Option<i64>, #[case] valid: bool) {
        let form = TestimonialForm {
            client_name: Some("Jane".to_string()),
            rating,
            testimonial_text: Some("Great!".to_string()),
        };
        assert_eq!(form.validate().is_ok(), valid);
    }

    #[test]
    fn test_check_image_accepts_png() {
        let upload = UploadedFile {
            filename: Some("logo.png".to_string()),
            data: Bytes::from_static(PNG),
        };
        let detected = check_image(&upload, 1024).expect("png accepted");
        assert_eq!(detected.ext, "png");
    }

    #[rstest]
    #[case(b"".as_slice(), 1024, "empty")]
    #[case(b"<svg></svg>".as_slice(), 1024, "invalid_image")]
    #[case(PNG, 4, "file_too_large")]
    fn test_check_image_rejects(#[case] data: &'static [u8], #[case] max: usize, #[case] code: &str) {
        let upload = UploadedFile {
            filename: None,
            data: Bytes::from_static(data),
        };
        let error = check_image(&upload, max).unwrap_err();
        assert_eq!(error.code, code);
    }
}
