use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.education";

#[derive(Clone, Debug, Deserialize, FromRow, PartialEq)]
pub struct Education {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub institution_id: Uuid,
    pub institution_name: Option<String>,
    pub is_current: bool,
    pub deleted: bool,
    pub created_at: DateTime<FixedOffset>,
}
