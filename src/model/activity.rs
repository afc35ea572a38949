use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.activity";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub deleted: bool,
}
