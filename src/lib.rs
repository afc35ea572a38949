pub mod cli;
pub mod core;
pub mod domain;
pub mod factory;
pub mod model;
pub mod repository;
pub mod settings;
