pub mod media;
pub mod profile;
