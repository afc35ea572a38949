use chrono::{DateTime, FixedOffset, Local, SubsecRound};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{domain::profile::ProfileType, model::user_profile::UserProfile};

pub struct UserProfileFactory<T: Clone> {
    modifier_one: fn(x: &UserProfile, ext: T) -> UserProfile,
    modifier_many: fn(x: &UserProfile, idx: usize, ext: T) -> UserProfile,
}

impl<T: Clone> Default for UserProfileFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> UserProfileFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &UserProfile, ext: T) -> UserProfile) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &UserProfile, idx: usize, ext: T) -> UserProfile,
    ) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<UserProfile> {
        let data = UserProfileDummy::new();
        let data = data.generate_one();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        insert_user_profile(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<UserProfile>> {
        let data = UserProfileDummy::new();
        let data = data.generate_many(num);
        let mut result: Vec<UserProfile> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            insert_user_profile(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

async fn insert_user_profile(
    tx: &mut Transaction<'_, Postgres>,
    data: &UserProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
    INSERT INTO public.user_profile (id, user_id, profile_type, parent_code, first_name,
        last_name, bio, state, grade_level, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
    )
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.profile_type)
    .bind(&data.parent_code)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.bio)
    .bind(&data.state)
    .bind(&data.grade_level)
    .bind(data.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// `created_at` truncated to what postgres stores, so fetched rows compare equal.
pub fn now_micros() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(6)
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct UserProfileDummy {
    pub id: Uuid,
    pub user_id: Uuid,
    pub parent_code: Option<String>,
    #[dummy(faker = "fake::faker::name::en::FirstName()")]
    pub first_name: String,
    #[dummy(faker = "fake::faker::name::en::LastName()")]
    pub last_name: String,
    pub bio: Option<String>,
    #[dummy(faker = "fake::faker::address::en::StateAbbr()")]
    pub state: String,
    #[dummy(faker = "9..13")]
    pub grade_level: u8,
}

impl UserProfileDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn into_user_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            user_id: self.user_id,
            profile_type: ProfileType::Student.as_str().to_string(),
            parent_code: self.parent_code,
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            bio: self.bio,
            state: Some(self.state),
            grade_level: Some(self.grade_level.to_string()),
            created_at: now_micros(),
        }
    }

    pub fn generate_one(&self) -> UserProfile {
        Faker.fake::<UserProfileDummy>().into_user_profile()
    }

    pub fn generate_many(&self, num: u32) -> Vec<UserProfile> {
        let mut result: Vec<UserProfile> = vec![];
        for _ in 0..num {
            result.push(Faker.fake::<Self>().into_user_profile());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sqlx::PgPool;

    use crate::{factory::user_profile::UserProfileFactory, model::user_profile::UserProfile};

    use super::now_micros;

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserProfileFactory::new();
        let data = factory.generate_one(&pool, ()).await?;

        // Expect
        let res: (i64, String) =
            sqlx::query_as(r#"SELECT COUNT(*), min(profile_type) FROM public.user_profile"#)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, 1);
        assert_eq!(res.1, "STUDENT");
        assert!(data.first_name.is_some());
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserProfileFactory::<String>::new();
        factory.modified_one(|data, ext| UserProfile {
            parent_code: Some(ext),
            profile_type: "PARENT".to_string(),
            ..data.clone()
        });
        factory.generate_one(&pool, "PC-42".to_string()).await?;

        // Expect
        let res: (String, Option<String>) =
            sqlx::query_as(r#"SELECT profile_type, parent_code FROM public.user_profile"#)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, "PARENT");
        assert_eq!(res.1, Some("PC-42".to_string()));
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserProfileFactory::new();
        factory.modified_many(|data, idx, _| UserProfile {
            created_at: now_micros() - Duration::minutes(idx as i64),
            ..data.clone()
        });
        let data = factory.generate_many(&pool, 5, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.user_profile"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 5);
        assert!(data[0].created_at > data[4].created_at);
        Ok(())
    }
}
