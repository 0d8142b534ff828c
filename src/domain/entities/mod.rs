pub mod account;
pub mod hero_image;
pub mod id;
pub mod profile;
pub mod team_member;
pub mod testimonial;
