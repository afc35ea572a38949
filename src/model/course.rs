use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.course";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub subject: Option<String>,
    pub deleted: bool,
}
