pub mod app_error;
pub mod dto;
pub mod interactors;
pub mod interface;
pub mod validation;
