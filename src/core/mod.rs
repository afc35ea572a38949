pub mod db;
pub mod error;
pub mod pagination;
pub mod sqlx_utils;
pub mod utils;
