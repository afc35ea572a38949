pub mod education;
pub mod related;
pub mod user_profile;
