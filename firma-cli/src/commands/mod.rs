pub mod generate;
pub mod profile;
