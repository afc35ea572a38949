use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.application";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub college_name: String,
    pub status: Option<String>,
    pub deleted: bool,
}
