use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    core::{
        pagination::{paginate_profiles, validate_page},
        sqlx_utils::{binds_query_as, query_builder, JoinKind, QueryParts, SqlxBinds},
    },
    domain::{
        page::Page,
        profile::{profiles_from_rows, UserProfileProps},
        repository::UserProfileRepository,
        search::SearchUsersParams,
    },
    model::user_profile::{
        order_by_newest, select_with_education, UserProfile, UserProfileWithEducation, TABLE_NAME,
    },
    repository::search::{current_education_join, suggested_users_query, SearchQueryBuilder},
};

async fn fetch_profiles(
    tx: &mut Transaction<'_, Postgres>,
    parts: &QueryParts,
    limit: Option<i64>,
) -> anyhow::Result<Vec<UserProfileWithEducation>> {
    let stmt = query_builder(
        Some(select_with_education()),
        TABLE_NAME,
        &parts.joins,
        &parts.wheres,
        order_by_newest(),
        limit,
        None,
    );
    Ok(binds_query_as::<UserProfileWithEducation>(&stmt, parts.binds.clone())
        .fetch_all(&mut **tx)
        .await?)
}

/// First profile whose `column` equals `value`, with its current education.
pub async fn get_profile_by_column(
    tx: &mut Transaction<'_, Postgres>,
    column: &str,
    value: SqlxBinds,
) -> anyhow::Result<Option<UserProfileWithEducation>> {
    let mut parts = QueryParts::new();
    parts.push_join(current_education_join(JoinKind::Left));
    let placeholder = parts.push_bind(value);
    parts.push_where(format!("{}.{} = {}", TABLE_NAME, column, placeholder));
    let data = fetch_profiles(tx, &parts, Some(1)).await?;
    Ok(data.into_iter().next())
}

pub async fn get_profiles_by_ids(
    tx: &mut Transaction<'_, Postgres>,
    ids: &[Uuid],
) -> anyhow::Result<Vec<UserProfileWithEducation>> {
    let mut parts = QueryParts::new();
    parts.push_join(current_education_join(JoinKind::Left));
    let placeholder = parts.push_bind(SqlxBinds::UuidArray(ids.to_vec()));
    parts.push_where(format!("{}.id = ANY({})", TABLE_NAME, placeholder));
    fetch_profiles(tx, &parts, None).await
}

pub async fn insert_profile(
    tx: &mut Transaction<'_, Postgres>,
    user_profile: &UserProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, profile_type, parent_code, first_name, last_name, bio,
            state, grade_level, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(user_profile.id)
    .bind(user_profile.user_id)
    .bind(&user_profile.profile_type)
    .bind(&user_profile.parent_code)
    .bind(&user_profile.first_name)
    .bind(&user_profile.last_name)
    .bind(&user_profile.bio)
    .bind(&user_profile.state)
    .bind(&user_profile.grade_level)
    .bind(user_profile.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Overwrites every mapped column of the row with `user_profile.id`.
/// Returns the number of rows touched.
pub async fn update_profile_row(
    tx: &mut Transaction<'_, Postgres>,
    user_profile: &UserProfile,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        format!(
            r#"UPDATE {}
            SET user_id = $1, profile_type = $2, parent_code = $3, first_name = $4,
            last_name = $5, bio = $6, state = $7, grade_level = $8, created_at = $9
            WHERE id = $10"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(user_profile.user_id)
    .bind(&user_profile.profile_type)
    .bind(&user_profile.parent_code)
    .bind(&user_profile.first_name)
    .bind(&user_profile.last_name)
    .bind(&user_profile.bio)
    .bind(&user_profile.state)
    .bind(&user_profile.grade_level)
    .bind(user_profile.created_at)
    .bind(user_profile.id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

/// Postgres-backed [`UserProfileRepository`].
///
/// Every call runs in its own transaction taken from the pool, reads roll back
/// on drop and writes commit before returning.
#[derive(Clone)]
pub struct UserProfileDbRepository {
    db: PgPool,
}

impl UserProfileDbRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn get_one(
        &self,
        column: &str,
        value: SqlxBinds,
    ) -> anyhow::Result<Option<UserProfileProps>> {
        let mut tx = self.db.begin().await?;
        let row = get_profile_by_column(&mut tx, column, value).await?;
        match row {
            Some(val) => Ok(Some(UserProfileProps::try_from(val)?)),
            None => Ok(None),
        }
    }

    async fn paginate(
        &self,
        parts: &QueryParts,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<Page<UserProfileProps>> {
        let mut tx = self.db.begin().await?;
        let (rows, metadata) = paginate_profiles(&mut tx, parts, page, page_size).await?;
        Ok(Page::new(profiles_from_rows(rows)?, metadata))
    }
}

#[async_trait]
impl UserProfileRepository for UserProfileDbRepository {
    async fn get_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<UserProfileProps>> {
        debug!("get profile by user_id {}", user_id);
        self.get_one("user_id", SqlxBinds::Uuid(user_id)).await
    }

    async fn get_profile_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserProfileProps>> {
        debug!("get profile by id {}", id);
        self.get_one("id", SqlxBinds::Uuid(id)).await
    }

    async fn get_by_parent_code(
        &self,
        parent_code: &str,
    ) -> anyhow::Result<Option<UserProfileProps>> {
        debug!("get profile by parent_code {}", parent_code);
        self.get_one("parent_code", SqlxBinds::String(parent_code.to_string()))
            .await
    }

    async fn create_profile(&self, entity: &UserProfileProps) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await?;
        insert_profile(&mut tx, &UserProfile::from(entity)).await?;
        tx.commit().await?;
        info!("created profile {} for user {}", entity.id, entity.user_id);
        Ok(())
    }

    async fn update_profile(&self, entity: &UserProfileProps) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await?;
        let rows = update_profile_row(&mut tx, &UserProfile::from(entity)).await?;
        tx.commit().await?;
        info!("updated profile {} ({} rows)", entity.id, rows);
        Ok(())
    }

    async fn get_profiles(
        &self,
        include_profile_ids: &[Uuid],
    ) -> anyhow::Result<Vec<UserProfileProps>> {
        debug!("get {} profiles by id", include_profile_ids.len());
        if include_profile_ids.is_empty() {
            return Ok(vec![]);
        }
        let mut tx = self.db.begin().await?;
        let rows = get_profiles_by_ids(&mut tx, include_profile_ids).await?;
        Ok(profiles_from_rows(rows)?)
    }

    async fn get_suggested_users(
        &self,
        user_id: Uuid,
        include_profile_ids: &[Uuid],
        exclude_profile_ids: &[Uuid],
        page: i64,
        page_size: i64,
        text: &str,
    ) -> anyhow::Result<Page<UserProfileProps>> {
        debug!(
            "suggested users for {} page {} page_size {} text {:?}",
            user_id, page, page_size, text
        );
        validate_page(page, page_size)?;
        let parts = suggested_users_query(user_id, include_profile_ids, exclude_profile_ids, text);
        self.paginate(&parts, page, page_size).await
    }

    async fn get_searched_users(
        &self,
        page: i64,
        page_size: i64,
        search_user_params: &SearchUsersParams,
    ) -> anyhow::Result<Page<UserProfileProps>> {
        debug!(
            "searched users page {} page_size {} params {:?}",
            page, page_size, search_user_params
        );
        validate_page(page, page_size)?;
        let parts = SearchQueryBuilder::new(search_user_params).build();
        self.paginate(&parts, page, page_size).await
    }
}
