use uuid::Uuid;

use crate::domain::entities::{id::Id, profile::Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedImage {
    pub content_type: &'static str,
    pub ext: &'static str,
}

/// Sniffs the raster format from the leading bytes. SVG is never accepted.
pub fn detect_image(data: &[u8]) -> Option<DetectedImage> {
    let detected = |content_type, ext| Some(DetectedImage { content_type, ext });

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return detected("image/png", "png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return detected("image/jpeg", "jpg");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return detected("image/gif", "gif");
    }
    if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return detected("image/webp", "webp");
    }
    if data.starts_with(b"BM") && data.len() >= 14 {
        return detected("image/bmp", "bmp");
    }
    None
}

/// Where an image belongs. Each kind gets its own key prefix in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Logo,
    ProfileImage,
    HeroImage,
    TeamPhoto,
    TestimonialPhoto,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Logo,
        MediaKind::ProfileImage,
        MediaKind::HeroImage,
        MediaKind::TeamPhoto,
        MediaKind::TestimonialPhoto,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Logo => "provider_logos",
            MediaKind::ProfileImage => "profile_images",
            MediaKind::HeroImage => "hero_images",
            MediaKind::TeamPhoto => "team_photos",
            MediaKind::TestimonialPhoto => "testimonial_photos",
        }
    }

    /// Fresh storage key, e.g. `hero_images/<profile>_<uuid>.png`.
    pub fn key_for(&self, profile_id: &Id<Profile>, ext: &str) -> String {
        format!(
            "{}/{}_{}.{}",
            self.prefix(),
            profile_id.value.simple(),
            Uuid::now_v7().simple(),
            ext
        )
    }

    /// Resolves the kind of a stored key, rejecting anything that could
    /// escape the media namespace.
    pub fn from_key(key: &str) -> Option<MediaKind> {
        let (prefix, name) = key.split_once('/')?;
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.starts_with('.')
            || !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return None;
        }
        MediaKind::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::entities::id::Id;
    use crate::domain::media::{MediaKind, detect_image};

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00];
    const GIF: &[u8] = b"GIF89a\x01\x00";
    const WEBP: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
    const BMP: &[u8] = b"BM\x36\x00\x00\x00\x00\x00\x00\x00\x36\x00\x00\x00";

    #[rstest]
    #[case(PNG, "image/png", "png")]
    #[case(JPEG, "image/jpeg", "jpg")]
    #[case(GIF, "image/gif", "gif")]
    #[case(WEBP, "image/webp", "webp")]
    #[case(BMP, "image/bmp", "bmp")]
    fn test_detect_image_known_formats(#[case] data: &[u8], #[case] content_type: &str, #[case] ext: &str) {
        let detected = detect_image(data).expect("format should be detected");
        assert_eq!(detected.content_type, content_type);
        assert_eq!(detected.ext, ext);
    }

    #[rstest]
    #[case(b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".as_slice())]
    #[case(b"<html><script>alert(1)</script></html>".as_slice())]
    #[case(b"MZ\x90\x00".as_slice())]
    #[case(b"".as_slice())]
    fn test_detect_image_rejects_non_raster(#[case] data: &[u8]) {
        assert!(detect_image(data).is_none());
    }

    #[test]
    fn test_key_for_uses_prefix_and_profile() {
        let profile_id = Id::generate();
        let key = MediaKind::HeroImage.key_for(&profile_id, "png");

        assert!(key.starts_with("hero_images/"));
        assert!(key.contains(&profile_id.value.simple().to_string()));
        assert!(key.ends_with(".png"));
        assert_eq!(MediaKind::from_key(&key), Some(MediaKind::HeroImage));
    }

    #[test]
    fn test_key_for_is_unique_per_call() {
        let profile_id = Id::generate();
        assert_ne!(
            MediaKind::Logo.key_for(&profile_id, "png"),
            MediaKind::Logo.key_for(&profile_id, "png")
        );
    }

    #[rstest]
    #[case("hero_images/../secrets.txt")]
    #[case("hero_images/a/b.png")]
    #[case("unknown/a.png")]
    #[case("hero_images/")]
    #[case("hero_images/.hidden")]
    #[case("no-prefix.png")]
    fn test_from_key_rejects_foreign_keys(#[case] key: &str) {
        assert_eq!(MediaKind::from_key(key), None);
    }
}
