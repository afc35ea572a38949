pub mod activity;
pub mod application;
pub mod award;
pub mod college_universities;
pub mod course;
pub mod education;
pub mod grade;
pub mod roles;
pub mod user_profile;
pub mod voluntary;
pub mod work;
