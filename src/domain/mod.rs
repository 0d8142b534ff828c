pub mod entities;
pub mod media;
