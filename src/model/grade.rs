use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.grade";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Grade {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub score: Option<String>,
    pub deleted: bool,
}
