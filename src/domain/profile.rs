use std::{collections::HashSet, fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    core::error::DomainError,
    model::{
        education::Education,
        user_profile::{UserProfile, UserProfileWithEducation},
    },
};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    Student,
    Parent,
    Counselor,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Student => "STUDENT",
            ProfileType::Parent => "PARENT",
            ProfileType::Counselor => "COUNSELOR",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(ProfileType::Student),
            "PARENT" => Ok(ProfileType::Parent),
            "COUNSELOR" => Ok(ProfileType::Counselor),
            other => Err(DomainError::UnknownProfileType(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EducationProps {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub institution_id: Uuid,
    pub institution_name: Option<String>,
    pub is_current: bool,
    pub deleted: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Education> for EducationProps {
    fn from(value: Education) -> Self {
        Self {
            id: value.id,
            profile_id: value.profile_id,
            institution_id: value.institution_id,
            institution_name: value.institution_name,
            is_current: value.is_current,
            deleted: value.deleted,
            created_at: value.created_at,
        }
    }
}

/// A user profile as the domain sees it.
///
/// `educations` only ever holds the current, non-deleted education and is
/// never written back through the profile.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct UserProfileProps {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_type: ProfileType,
    pub parent_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub state: Option<String>,
    pub grade_level: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub educations: Vec<EducationProps>,
}

impl TryFrom<UserProfile> for UserProfileProps {
    type Error = DomainError;

    fn try_from(value: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            user_id: value.user_id,
            profile_type: value.profile_type.parse()?,
            parent_code: value.parent_code,
            first_name: value.first_name,
            last_name: value.last_name,
            bio: value.bio,
            state: value.state,
            grade_level: value.grade_level,
            created_at: value.created_at,
            educations: vec![],
        })
    }
}

impl TryFrom<UserProfileWithEducation> for UserProfileProps {
    type Error = DomainError;

    fn try_from(value: UserProfileWithEducation) -> Result<Self, Self::Error> {
        let education = value.education();
        let mut props = UserProfileProps::try_from(value.profile)?;
        props.educations = education.into_iter().map(EducationProps::from).collect();
        Ok(props)
    }
}

impl From<&UserProfileProps> for UserProfile {
    fn from(value: &UserProfileProps) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            profile_type: value.profile_type.as_str().to_string(),
            parent_code: value.parent_code.clone(),
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            bio: value.bio.clone(),
            state: value.state.clone(),
            grade_level: value.grade_level.clone(),
            created_at: value.created_at,
        }
    }
}

/// Maps joined rows into value objects, keeping the first row seen per profile.
pub fn profiles_from_rows(
    rows: Vec<UserProfileWithEducation>,
) -> Result<Vec<UserProfileProps>, DomainError> {
    let mut seen: HashSet<Uuid> = HashSet::with_capacity(rows.len());
    let mut items: Vec<UserProfileProps> = Vec::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.profile.id) {
            continue;
        }
        items.push(UserProfileProps::try_from(row)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    fn profile_row(profile_type: &str) -> UserProfile {
        UserProfile {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            profile_type: profile_type.to_string(),
            parent_code: Some("PC-1".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            bio: None,
            state: Some("CA".to_string()),
            grade_level: Some("11".to_string()),
            created_at: Local::now().fixed_offset(),
        }
    }

    fn joined(profile: UserProfile, education_id: Option<Uuid>) -> UserProfileWithEducation {
        UserProfileWithEducation {
            profile,
            education_id,
            education_institution_id: education_id.map(|_| Uuid::now_v7()),
            education_institution_name: Some("North High".to_string()),
            education_is_current: education_id.map(|_| true),
            education_deleted: education_id.map(|_| false),
            education_created_at: education_id.map(|_| Local::now().fixed_offset()),
        }
    }

    #[test]
    fn test_profile_type_parse() {
        assert_eq!("STUDENT".parse::<ProfileType>(), Ok(ProfileType::Student));
        assert_eq!("COUNSELOR".parse::<ProfileType>(), Ok(ProfileType::Counselor));
        assert_eq!(
            "TUTOR".parse::<ProfileType>(),
            Err(DomainError::UnknownProfileType("TUTOR".to_string()))
        );
        assert_eq!(ProfileType::Parent.to_string(), "PARENT");
    }

    #[test]
    fn test_row_props_roundtrip() {
        let row = profile_row("STUDENT");
        let props = UserProfileProps::try_from(row.clone()).unwrap();
        assert_eq!(props.profile_type, ProfileType::Student);
        assert!(props.educations.is_empty());
        assert_eq!(UserProfile::from(&props), row);
    }

    #[test]
    fn test_unknown_profile_type_is_rejected() {
        let row = profile_row("ALIEN");
        assert!(UserProfileProps::try_from(row).is_err());
    }

    #[test]
    fn test_joined_row_attaches_education() {
        let education_id = Uuid::now_v7();
        let props = UserProfileProps::try_from(joined(profile_row("STUDENT"), Some(education_id)))
            .unwrap();
        assert_eq!(props.educations.len(), 1);
        assert_eq!(props.educations[0].id, education_id);
        assert_eq!(props.educations[0].profile_id, props.id);

        let props = UserProfileProps::try_from(joined(profile_row("STUDENT"), None)).unwrap();
        assert!(props.educations.is_empty());
    }

    #[test]
    fn test_profiles_from_rows_keeps_first_per_profile() {
        let row = profile_row("STUDENT");
        let other = profile_row("PARENT");
        let rows = vec![
            joined(row.clone(), Some(Uuid::now_v7())),
            joined(other.clone(), None),
            joined(row.clone(), None),
        ];
        let items = profiles_from_rows(rows).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, row.id);
        assert_eq!(items[0].educations.len(), 1);
        assert_eq!(items[1].id, other.id);
    }
}
