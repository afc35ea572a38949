pub mod page;
pub mod profile;
pub mod repository;
pub mod search;
