use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.college_universities";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct CollegeUniversities {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub deleted: bool,
}
