use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.voluntary";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Voluntary {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub organization: String,
    pub role: Option<String>,
    pub deleted: bool,
}
