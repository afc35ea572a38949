use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.award";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Award {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub issuer: Option<String>,
    pub deleted: bool,
}
