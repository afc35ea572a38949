use uuid::Uuid;

use crate::{
    core::{
        sqlx_utils::{join_clause, JoinKind, QueryParts, SqlxBinds},
        utils::to_prefix_tsquery,
    },
    domain::{
        profile::ProfileType,
        search::{
            MappingTarget, MatchKey, QueryParamMapping, Relation, SearchUsersParams,
            PROFILE_QUERY_PARAMS_MAPPING,
        },
    },
    model::{education::TABLE_NAME as EDUCATION_TABLE_NAME, user_profile::TABLE_NAME},
};

/// Join on the profile's current, non-deleted education.
pub fn current_education_join(kind: JoinKind) -> String {
    join_clause(
        kind,
        EDUCATION_TABLE_NAME,
        &[
            format!("{}.is_current = true", EDUCATION_TABLE_NAME),
            format!("{}.profile_id = {}.id", EDUCATION_TABLE_NAME, TABLE_NAME),
            format!("{}.deleted IS NOT TRUE", EDUCATION_TABLE_NAME),
        ],
    )
}

fn related_join(target: &MappingTarget) -> String {
    let table = target.table.table_name();
    let matched = match target.match_id {
        MatchKey::ProfileId => format!("{}.profile_id = {}.id", table, TABLE_NAME),
        MatchKey::UserId(column) => format!("{}.{} = {}.user_id", table, column, TABLE_NAME),
    };
    join_clause(
        JoinKind::Left,
        table,
        &[matched, format!("{}.deleted IS NOT TRUE", table)],
    )
}

/// Interprets the query mapping against a set of search params.
///
/// Conditions are collected first and combined with OR once every entry has
/// been visited, so entry order never changes the generated predicate.
pub struct SearchQueryBuilder<'a> {
    params: &'a SearchUsersParams,
    mapping: &'a [QueryParamMapping],
}

impl<'a> SearchQueryBuilder<'a> {
    pub fn new(params: &'a SearchUsersParams) -> Self {
        Self::with_mapping(params, PROFILE_QUERY_PARAMS_MAPPING)
    }

    pub fn with_mapping(params: &'a SearchUsersParams, mapping: &'a [QueryParamMapping]) -> Self {
        Self { params, mapping }
    }

    pub fn build(&self) -> QueryParts {
        let mut parts = QueryParts::new();

        let mut conditions: Vec<String> = vec![];
        for entry in self.mapping.iter() {
            let Some(target) = entry.target.as_ref() else {
                continue;
            };
            let values = self.params.collect_values(entry.params);
            if values.is_empty() {
                continue;
            }

            let table = target.table.table_name();
            if target.table != Relation::UserProfile {
                parts.push_join(related_join(target));
            }
            let placeholder = parts.push_bind(SqlxBinds::StringArray(values));
            for column in target.query_fields.iter() {
                conditions.push(format!("{}.{}::text = ANY({})", table, column, placeholder));
            }
        }
        if !conditions.is_empty() {
            parts.push_where(format!("({})", conditions.join(" OR ")));
        }

        let placeholder =
            parts.push_bind(SqlxBinds::String(ProfileType::Student.as_str().to_string()));
        parts.push_where(format!("{}.profile_type = {}", TABLE_NAME, placeholder));

        if self.params.school.is_empty() {
            parts.push_join(current_education_join(JoinKind::Left));
        } else {
            parts.push_join(current_education_join(JoinKind::Inner));
            let placeholder = parts.push_bind(SqlxBinds::UuidArray(self.params.school.clone()));
            parts.push_where(format!(
                "{}.institution_id = ANY({})",
                EDUCATION_TABLE_NAME, placeholder
            ));
        }
        parts
    }
}

/// Profiles other than `user_id`'s own, optionally narrowed by free text and
/// include / exclude id lists.
pub fn suggested_users_query(
    user_id: Uuid,
    include_profile_ids: &[Uuid],
    exclude_profile_ids: &[Uuid],
    text: &str,
) -> QueryParts {
    let mut parts = QueryParts::new();
    parts.push_join(current_education_join(JoinKind::Left));

    let placeholder = parts.push_bind(SqlxBinds::Uuid(user_id));
    parts.push_where(format!("{}.user_id != {}", TABLE_NAME, placeholder));

    if let Some(tsquery) = to_prefix_tsquery(text) {
        let placeholder = parts.push_bind(SqlxBinds::String(tsquery));
        parts.push_where(format!(
            "{}.search_vector @@ to_tsquery('simple', {})",
            TABLE_NAME, placeholder
        ));
    }
    if !include_profile_ids.is_empty() {
        let placeholder = parts.push_bind(SqlxBinds::UuidArray(include_profile_ids.to_vec()));
        parts.push_where(format!("{}.id = ANY({})", TABLE_NAME, placeholder));
    }
    if !exclude_profile_ids.is_empty() {
        let placeholder = parts.push_bind(SqlxBinds::UuidArray(exclude_profile_ids.to_vec()));
        parts.push_where(format!("NOT ({}.id = ANY({}))", TABLE_NAME, placeholder));
    }
    parts
}
