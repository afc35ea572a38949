use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    core::{
        error::DomainError,
        sqlx_utils::{binds_query_as, query_builder, QueryParts},
    },
    domain::page::PageMetadata,
    model::user_profile::{
        order_by_newest, select_with_education, UserProfileWithEducation, TABLE_NAME,
    },
};

pub fn validate_page(page: i64, page_size: i64) -> Result<(), DomainError> {
    page_offset(page, page_size).map(|_| ())
}

/// Rows skipped before `page`, `(page - 1) * page_size`.
pub fn page_offset(page: i64, page_size: i64) -> Result<i64, DomainError> {
    if page <= 0 {
        return Err(DomainError::InvalidPage);
    }
    if page_size <= 0 {
        return Err(DomainError::InvalidPageSize);
    }
    (page - 1)
        .checked_mul(page_size)
        .ok_or(DomainError::PageOutOfRange)
}

/// How many rows are missing to fill the requested page.
pub fn extra_count(metadata: &PageMetadata) -> i64 {
    metadata
        .page
        .saturating_mul(metadata.page_size)
        .saturating_sub(metadata.total)
        .max(0)
}

fn count_statement(parts: &QueryParts) -> String {
    query_builder(
        Some(format!("count(DISTINCT {}.id)", TABLE_NAME)),
        TABLE_NAME,
        &parts.joins,
        &parts.wheres,
        vec![],
        None,
        None,
    )
}

fn window_statement(parts: &QueryParts, limit: i64, offset: Option<i64>) -> String {
    query_builder(
        Some(format!("DISTINCT {}", select_with_education())),
        TABLE_NAME,
        &parts.joins,
        &parts.wheres,
        order_by_newest(),
        Some(limit),
        offset,
    )
}

/// Number of distinct profiles matched by `parts`.
pub async fn results_count(
    tx: &mut Transaction<'_, Postgres>,
    parts: &QueryParts,
) -> anyhow::Result<i64> {
    let stmt = count_statement(parts);
    let count = binds_query_as::<(i64,)>(&stmt, parts.binds.clone())
        .fetch_one(&mut **tx)
        .await?;
    Ok(count.0)
}

/// Fetches one page of `parts` plus the unwindowed total.
///
/// Count and fetch are two separate reads, the total may drift from the items
/// under concurrent writes.
pub async fn paginate_profiles(
    tx: &mut Transaction<'_, Postgres>,
    parts: &QueryParts,
    page: i64,
    page_size: i64,
) -> anyhow::Result<(Vec<UserProfileWithEducation>, PageMetadata)> {
    let offset = page_offset(page, page_size)?;
    let stmt = window_statement(parts, page_size, Some(offset));
    debug!("paginate profiles: {}", stmt);

    let data = binds_query_as::<UserProfileWithEducation>(&stmt, parts.binds.clone())
        .fetch_all(&mut **tx)
        .await?;
    let total = results_count(tx, parts).await?;
    Ok((
        data,
        PageMetadata {
            page,
            page_size,
            total,
        },
    ))
}

/// Newest `nextra` rows of `parts` with the total they were drawn from.
pub async fn fetch_extra_profiles(
    tx: &mut Transaction<'_, Postgres>,
    parts: &QueryParts,
    nextra: i64,
) -> anyhow::Result<(Vec<UserProfileWithEducation>, i64)> {
    let total = results_count(tx, parts).await?;
    if nextra <= 0 {
        return Ok((vec![], total));
    }
    let stmt = window_statement(parts, nextra, None);
    let data = binds_query_as::<UserProfileWithEducation>(&stmt, parts.binds.clone())
        .fetch_all(&mut **tx)
        .await?;
    Ok((data, total))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sqlx::PgPool;

    use crate::{
        core::sqlx_utils::{JoinKind, SqlxBinds},
        factory::user_profile::{now_micros, UserProfileFactory},
        model::user_profile::UserProfile,
        repository::search::current_education_join,
    };

    use super::*;

    fn all_profiles() -> QueryParts {
        let mut parts = QueryParts::new();
        parts.push_join(current_education_join(JoinKind::Left));
        parts
    }

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(1, 1), Ok(()));
        assert_eq!(validate_page(0, 10), Err(DomainError::InvalidPage));
        assert_eq!(validate_page(-3, 10), Err(DomainError::InvalidPage));
        assert_eq!(validate_page(1, 0), Err(DomainError::InvalidPageSize));
        assert_eq!(validate_page(2, -1), Err(DomainError::InvalidPageSize));
        assert_eq!(
            validate_page(i64::MAX, 2),
            Err(DomainError::PageOutOfRange)
        );
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), Ok(0));
        assert_eq!(page_offset(3, 10), Ok(20));
        assert_eq!(page_offset(2, i64::MAX), Ok(i64::MAX));
        assert_eq!(page_offset(3, i64::MAX), Err(DomainError::PageOutOfRange));
    }

    #[test]
    fn test_extra_count() {
        let metadata = |page, page_size, total| PageMetadata {
            page,
            page_size,
            total,
        };
        assert_eq!(extra_count(&metadata(1, 10, 4)), 6);
        assert_eq!(extra_count(&metadata(3, 10, 25)), 5);
        assert_eq!(extra_count(&metadata(1, 10, 25)), 0);
        assert_eq!(extra_count(&metadata(2, 10, 20)), 0);
    }

    #[test]
    fn test_statements() {
        let mut parts = QueryParts::new();
        let placeholder = parts.push_bind(SqlxBinds::String("STUDENT".to_string()));
        parts.push_where(format!("public.user_profile.profile_type = {}", placeholder));

        let count = count_statement(&parts);
        assert_eq!(
            count,
            "SELECT count(DISTINCT public.user_profile.id) FROM public.user_profile \
            WHERE public.user_profile.profile_type = $1"
        );

        let window = window_statement(&parts, 10, Some(20));
        assert!(window.starts_with("SELECT DISTINCT public.user_profile.id,"));
        assert!(window.ends_with(
            "ORDER BY public.user_profile.created_at DESC, public.user_profile.id DESC \
            LIMIT 10 OFFSET 20"
        ));

        let window = window_statement(&parts, 5_000_000_000, Some(10_000_000_000));
        assert!(window.ends_with("LIMIT 5000000000 OFFSET 10000000000"));
    }

    #[sqlx::test]
    async fn test_paginate_profiles(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = UserProfileFactory::new();
        factory.modified_many(|x, idx, _| UserProfile {
            created_at: now_micros() - Duration::minutes(idx as i64),
            ..x.clone()
        });
        let data = factory.generate_many(&pool, 7, ()).await?;
        let mut tx = pool.begin().await?;

        // When
        let (rows, metadata) = paginate_profiles(&mut tx, &all_profiles(), 2, 3).await?;

        // Expect
        assert_eq!(
            metadata,
            PageMetadata {
                page: 2,
                page_size: 3,
                total: 7
            }
        );
        let ids: Vec<_> = rows.iter().map(|x| x.profile.id).collect();
        assert_eq!(ids, vec![data[3].id, data[4].id, data[5].id]);

        // When
        let (rows, metadata) = paginate_profiles(&mut tx, &all_profiles(), 4, 3).await?;

        // Expect
        assert!(rows.is_empty());
        assert_eq!(metadata.total, 7);
        assert_eq!(extra_count(&metadata), 5);
        Ok(())
    }

    #[sqlx::test]
    async fn test_paginate_profiles_rejects_page(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let err = paginate_profiles(&mut tx, &all_profiles(), 0, 3)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::InvalidPage)
        );
        Ok(())
    }

    #[sqlx::test]
    async fn test_fetch_extra_profiles(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = UserProfileFactory::new();
        factory.modified_many(|x, idx, _| UserProfile {
            created_at: now_micros() - Duration::minutes(idx as i64),
            ..x.clone()
        });
        let data = factory.generate_many(&pool, 4, ()).await?;
        let mut tx = pool.begin().await?;

        // When
        let (rows, total) = fetch_extra_profiles(&mut tx, &all_profiles(), 2).await?;
        let (none, _) = fetch_extra_profiles(&mut tx, &all_profiles(), 0).await?;

        // Expect
        assert_eq!(total, 4);
        assert_eq!(results_count(&mut tx, &all_profiles()).await?, 4);
        let ids: Vec<_> = rows.iter().map(|x| x.profile.id).collect();
        assert_eq!(ids, vec![data[0].id, data[1].id]);
        assert!(none.is_empty());
        Ok(())
    }
}
