pub mod hero_image;
pub mod profile;
pub mod team_member;
pub mod testimonial;
