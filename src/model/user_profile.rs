use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::education::{Education, TABLE_NAME as EDUCATION_TABLE_NAME};

pub const TABLE_NAME: &str = "public.user_profile";

/// Mapped columns, `search_vector` is generated by the database and only queried.
pub const COLUMNS: [&str; 10] = [
    "id",
    "user_id",
    "profile_type",
    "parent_code",
    "first_name",
    "last_name",
    "bio",
    "state",
    "grade_level",
    "created_at",
];

#[derive(Clone, Debug, Deserialize, FromRow, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_type: String,
    pub parent_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub state: Option<String>,
    pub grade_level: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

/// A profile row left-joined with its current education.
#[derive(Clone, Debug, FromRow)]
pub struct UserProfileWithEducation {
    #[sqlx(flatten)]
    pub profile: UserProfile,
    pub education_id: Option<Uuid>,
    pub education_institution_id: Option<Uuid>,
    pub education_institution_name: Option<String>,
    pub education_is_current: Option<bool>,
    pub education_deleted: Option<bool>,
    pub education_created_at: Option<DateTime<FixedOffset>>,
}

impl UserProfileWithEducation {
    /// The joined education, if the outer join matched one.
    pub fn education(&self) -> Option<Education> {
        Some(Education {
            id: self.education_id?,
            profile_id: self.profile.id,
            institution_id: self.education_institution_id?,
            institution_name: self.education_institution_name.clone(),
            is_current: self.education_is_current.unwrap_or(false),
            deleted: self.education_deleted.unwrap_or(false),
            created_at: self.education_created_at?,
        })
    }
}

/// Select list for [`UserProfileWithEducation`], joined education columns are
/// prefixed with `education_`.
pub fn select_with_education() -> String {
    let mut columns: Vec<String> = COLUMNS
        .iter()
        .map(|column| format!("{}.{}", TABLE_NAME, column))
        .collect();
    for column in [
        "id",
        "institution_id",
        "institution_name",
        "is_current",
        "deleted",
        "created_at",
    ] {
        columns.push(format!(
            "{}.{} AS education_{}",
            EDUCATION_TABLE_NAME, column, column
        ));
    }
    columns.join(", ")
}

/// Newest first, id breaks ties so page windows are stable.
pub fn order_by_newest() -> Vec<String> {
    vec![
        format!("{}.created_at DESC", TABLE_NAME),
        format!("{}.id DESC", TABLE_NAME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_with_education() {
        let select = select_with_education();
        assert!(select.starts_with("public.user_profile.id, public.user_profile.user_id"));
        assert!(select.contains("public.education.id AS education_id"));
        assert!(select.ends_with("public.education.created_at AS education_created_at"));
        assert!(!select.contains("search_vector"));
    }
}
