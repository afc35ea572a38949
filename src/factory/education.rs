use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{factory::user_profile::now_micros, model::education::Education};

/// Educations always belong to a profile, `ext` carries whatever the modifier
/// needs to attach them.
pub struct EducationFactory<T: Clone> {
    modifier_one: fn(x: &Education, ext: T) -> Education,
}

impl<T: Clone> Default for EducationFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EducationFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Education, ext: T) -> Education) {
        self.modifier_one = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Education> {
        let data = EducationDummy::new().into_education();
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(
            r#"
        INSERT INTO public.education (id, profile_id, institution_id, institution_name,
            is_current, deleted, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(data.id)
        .bind(data.profile_id)
        .bind(data.institution_id)
        .bind(&data.institution_name)
        .bind(data.is_current)
        .bind(data.deleted)
        .bind(data.created_at)
        .execute(db)
        .await?;
        Ok(data)
    }
}

/// Current, non-deleted education of `profile_id` at `institution_id`.
pub async fn generate_current_education(
    db: &PgPool,
    profile_id: Uuid,
    institution_id: Uuid,
) -> anyhow::Result<Education> {
    let mut factory = EducationFactory::<(Uuid, Uuid)>::new();
    factory.modified_one(|data, ext| Education {
        profile_id: ext.0,
        institution_id: ext.1,
        is_current: true,
        deleted: false,
        ..data.clone()
    });
    factory.generate_one(db, (profile_id, institution_id)).await
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct EducationDummy {
    pub id: Uuid,
    pub institution_id: Uuid,
    #[dummy(faker = "fake::faker::company::en::CompanyName()")]
    pub institution_name: String,
}

impl EducationDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn into_education(self) -> Education {
        Education {
            id: self.id,
            profile_id: Uuid::nil(),
            institution_id: self.institution_id,
            institution_name: Some(self.institution_name),
            is_current: false,
            deleted: false,
            created_at: now_micros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::factory::{education::generate_current_education, user_profile::UserProfileFactory};

    #[sqlx::test]
    async fn test_generate_current_education(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = UserProfileFactory::new().generate_one(&pool, ()).await?;
        let institution_id = Uuid::now_v7();

        // When
        generate_current_education(&pool, profile.id, institution_id).await?;

        // Expect
        let res: (Uuid, Uuid, bool, bool) = sqlx::query_as(
            r#"SELECT profile_id, institution_id, is_current, deleted FROM public.education"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, profile.id);
        assert_eq!(res.1, institution_id);
        assert!(res.2);
        assert!(!res.3);
        Ok(())
    }
}
