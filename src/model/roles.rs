use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.roles";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Roles {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub deleted: bool,
}
