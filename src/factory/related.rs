use sqlx::PgPool;
use uuid::Uuid;

use crate::model::{
    activity::{self, Activity},
    application::{self, Application},
    award::{self, Award},
    college_universities::{self, CollegeUniversities},
    course::{self, Course},
    grade::{self, Grade},
    roles::{self, Roles},
    voluntary::{self, Voluntary},
    work::{self, Work},
};

// Child rows searched through the query mapping. Each insert writes every
// column of its row as given.

pub async fn insert_activity(db: &PgPool, data: &Activity) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, name, category, deleted) VALUES ($1, $2, $3, $4, $5)",
        activity::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_application(db: &PgPool, data: &Application) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, college_name, status, deleted) VALUES ($1, $2, $3, $4, $5)",
        application::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.college_name)
    .bind(&data.status)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_award(db: &PgPool, data: &Award) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, title, issuer, deleted) VALUES ($1, $2, $3, $4, $5)",
        award::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.title)
    .bind(&data.issuer)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_course(db: &PgPool, data: &Course) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, name, subject, deleted) VALUES ($1, $2, $3, $4, $5)",
        course::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.name)
    .bind(&data.subject)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_grade(db: &PgPool, data: &Grade) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, name, score, deleted) VALUES ($1, $2, $3, $4, $5)",
        grade::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.name)
    .bind(&data.score)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_roles(db: &PgPool, data: &Roles) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, user_id, title, deleted) VALUES ($1, $2, $3, $4)",
        roles::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.title)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_voluntary(db: &PgPool, data: &Voluntary) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, organization, role, deleted) VALUES ($1, $2, $3, $4, $5)",
        voluntary::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.organization)
    .bind(&data.role)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_work(db: &PgPool, data: &Work) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, profile_id, employer, job_title, deleted) VALUES ($1, $2, $3, $4, $5)",
        work::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.profile_id)
    .bind(&data.employer)
    .bind(&data.job_title)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_college_universities(
    db: &PgPool,
    data: &CollegeUniversities,
) -> anyhow::Result<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (id, user_id, name, deleted) VALUES ($1, $2, $3, $4)",
        college_universities::TABLE_NAME
    ))
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.name)
    .bind(data.deleted)
    .execute(db)
    .await?;
    Ok(())
}

/// Reads back the names of a profile's rows in `table`, soft-deleted ones included.
pub async fn related_names(
    db: &PgPool,
    table_name: &str,
    column: &str,
    owner_column: &str,
    owner_id: Uuid,
) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(&format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        column, table_name, owner_column, column
    ))
    .bind(owner_id)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(|x| x.0).collect())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::*;
    use crate::factory::user_profile::UserProfileFactory;

    #[sqlx::test]
    async fn test_insert_related_rows(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = UserProfileFactory::new().generate_one(&pool, ()).await?;

        // When
        insert_award(
            &pool,
            &Award {
                id: Uuid::now_v7(),
                profile_id: profile.id,
                title: "Science Fair".to_string(),
                issuer: None,
                deleted: false,
            },
        )
        .await?;
        insert_award(
            &pool,
            &Award {
                id: Uuid::now_v7(),
                profile_id: profile.id,
                title: "Debate".to_string(),
                issuer: Some("NSDA".to_string()),
                deleted: true,
            },
        )
        .await?;
        insert_roles(
            &pool,
            &Roles {
                id: Uuid::now_v7(),
                user_id: profile.user_id,
                title: "Captain".to_string(),
                deleted: false,
            },
        )
        .await?;

        // Expect
        let awards = related_names(&pool, award::TABLE_NAME, "title", "profile_id", profile.id)
            .await?;
        assert_eq!(awards, vec!["Debate", "Science Fair"]);
        let titles =
            related_names(&pool, roles::TABLE_NAME, "title", "user_id", profile.user_id).await?;
        assert_eq!(titles, vec!["Captain"]);
        Ok(())
    }
}
