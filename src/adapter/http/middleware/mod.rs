pub mod account;
pub mod extractor;
