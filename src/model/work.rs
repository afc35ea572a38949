use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.work";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Work {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub employer: String,
    pub job_title: Option<String>,
    pub deleted: bool,
}
