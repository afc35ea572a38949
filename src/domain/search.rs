use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
    activity, application, award, college_universities, course, grade, roles, user_profile,
    voluntary, work,
};

/// Logical search fields a caller can filter on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchField {
    GradeLevel,
    State,
    Activity,
    ActivityCategory,
    Application,
    Award,
    Course,
    Subject,
    Grade,
    Role,
    Voluntary,
    Work,
    College,
    KarmaTag,
}

/// Named filter criteria for the faceted profile search.
///
/// `school` is handled on its own against the current education, every other
/// field is resolved through [`PROFILE_QUERY_PARAMS_MAPPING`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SearchUsersParams {
    pub school: Vec<Uuid>,
    pub grade_level: Vec<String>,
    pub state: Vec<String>,
    pub activity: Vec<String>,
    pub activity_category: Vec<String>,
    pub application: Vec<String>,
    pub award: Vec<String>,
    pub course: Vec<String>,
    pub subject: Vec<String>,
    pub grade: Vec<String>,
    pub role: Vec<String>,
    pub voluntary: Vec<String>,
    pub work: Vec<String>,
    pub college: Vec<String>,
    pub karma_tag: Vec<String>,
}

impl SearchUsersParams {
    pub fn values(&self, field: SearchField) -> &[String] {
        match field {
            SearchField::GradeLevel => &self.grade_level,
            SearchField::State => &self.state,
            SearchField::Activity => &self.activity,
            SearchField::ActivityCategory => &self.activity_category,
            SearchField::Application => &self.application,
            SearchField::Award => &self.award,
            SearchField::Course => &self.course,
            SearchField::Subject => &self.subject,
            SearchField::Grade => &self.grade,
            SearchField::Role => &self.role,
            SearchField::Voluntary => &self.voluntary,
            SearchField::Work => &self.work,
            SearchField::College => &self.college,
            SearchField::KarmaTag => &self.karma_tag,
        }
    }

    /// All values supplied for a group of fields, in field order.
    pub fn collect_values(&self, fields: &[SearchField]) -> Vec<String> {
        fields
            .iter()
            .flat_map(|field| self.values(*field).iter().cloned())
            .collect()
    }
}

/// Tables a search field can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    UserProfile,
    Activity,
    Application,
    Award,
    Course,
    Grade,
    Roles,
    Voluntary,
    Work,
    CollegeUniversities,
}

impl Relation {
    pub fn table_name(&self) -> &'static str {
        match self {
            Relation::UserProfile => user_profile::TABLE_NAME,
            Relation::Activity => activity::TABLE_NAME,
            Relation::Application => application::TABLE_NAME,
            Relation::Award => award::TABLE_NAME,
            Relation::Course => course::TABLE_NAME,
            Relation::Grade => grade::TABLE_NAME,
            Relation::Roles => roles::TABLE_NAME,
            Relation::Voluntary => voluntary::TABLE_NAME,
            Relation::Work => work::TABLE_NAME,
            Relation::CollegeUniversities => college_universities::TABLE_NAME,
        }
    }
}

/// How a related table is matched back to the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKey {
    /// `<table>.profile_id = user_profile.id`
    ProfileId,
    /// `<table>.<column> = user_profile.user_id`
    UserId(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingTarget {
    pub table: Relation,
    pub query_fields: &'static [&'static str],
    pub match_id: MatchKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryParamMapping {
    pub params: &'static [SearchField],
    /// `None` for fields that are accepted but not searchable yet.
    pub target: Option<MappingTarget>,
}

pub const PROFILE_QUERY_PARAMS_MAPPING: &[QueryParamMapping] = &[
    QueryParamMapping {
        params: &[SearchField::GradeLevel],
        target: Some(MappingTarget {
            table: Relation::UserProfile,
            query_fields: &["grade_level"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::State],
        target: Some(MappingTarget {
            table: Relation::UserProfile,
            query_fields: &["state"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Activity, SearchField::ActivityCategory],
        target: Some(MappingTarget {
            table: Relation::Activity,
            query_fields: &["name", "category"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Application],
        target: Some(MappingTarget {
            table: Relation::Application,
            query_fields: &["college_name"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Award],
        target: Some(MappingTarget {
            table: Relation::Award,
            query_fields: &["title"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Course, SearchField::Subject],
        target: Some(MappingTarget {
            table: Relation::Course,
            query_fields: &["name", "subject"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Grade],
        target: Some(MappingTarget {
            table: Relation::Grade,
            query_fields: &["name"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Role],
        target: Some(MappingTarget {
            table: Relation::Roles,
            query_fields: &["title"],
            match_id: MatchKey::UserId("user_id"),
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Voluntary],
        target: Some(MappingTarget {
            table: Relation::Voluntary,
            query_fields: &["organization", "role"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::Work],
        target: Some(MappingTarget {
            table: Relation::Work,
            query_fields: &["employer", "job_title"],
            match_id: MatchKey::ProfileId,
        }),
    },
    QueryParamMapping {
        params: &[SearchField::College],
        target: Some(MappingTarget {
            table: Relation::CollegeUniversities,
            query_fields: &["name"],
            match_id: MatchKey::UserId("user_id"),
        }),
    },
    // karma tags are searched elsewhere
    QueryParamMapping {
        params: &[SearchField::KarmaTag],
        target: None,
    },
];
