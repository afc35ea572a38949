use uuid::Uuid;

use crate::domain::{repository::UserProfileRepository, search::SearchUsersParams};

#[derive(Debug, Clone)]
pub enum ProfileLookup {
    UserId(Uuid),
    Id(Uuid),
    ParentCode(String),
}

/// Prints the profile as JSON, `null` when it does not exist.
pub async fn get_profile<R: UserProfileRepository>(
    repo: &R,
    lookup: ProfileLookup,
) -> anyhow::Result<String> {
    let profile = match lookup {
        ProfileLookup::UserId(user_id) => repo.get_by_user_id(user_id).await?,
        ProfileLookup::Id(id) => repo.get_profile_by_id(id).await?,
        ProfileLookup::ParentCode(code) => repo.get_by_parent_code(&code).await?,
    };
    Ok(serde_json::to_string_pretty(&profile)?)
}

pub async fn list_profiles<R: UserProfileRepository>(
    repo: &R,
    ids: &[Uuid],
) -> anyhow::Result<String> {
    let profiles = repo.get_profiles(ids).await?;
    Ok(serde_json::to_string_pretty(&profiles)?)
}

pub async fn suggest_profiles<R: UserProfileRepository>(
    repo: &R,
    user_id: Uuid,
    include: &[Uuid],
    exclude: &[Uuid],
    page: i64,
    page_size: i64,
    text: &str,
) -> anyhow::Result<String> {
    let res = repo
        .get_suggested_users(user_id, include, exclude, page, page_size, text)
        .await?;
    Ok(serde_json::to_string_pretty(&res)?)
}

pub async fn search_profiles<R: UserProfileRepository>(
    repo: &R,
    page: i64,
    page_size: i64,
    params: &SearchUsersParams,
) -> anyhow::Result<String> {
    let res = repo.get_searched_users(page, page_size, params).await?;
    Ok(serde_json::to_string_pretty(&res)?)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::{
        cli::profile::{get_profile, list_profiles, search_profiles, ProfileLookup},
        domain::search::SearchUsersParams,
        factory::user_profile::UserProfileFactory,
        repository::profile::UserProfileDbRepository,
    };

    #[sqlx::test]
    async fn test_get_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = UserProfileFactory::new().generate_one(&pool, ()).await?;
        let repo = UserProfileDbRepository::new(pool);

        // When
        let found = get_profile(&repo, ProfileLookup::UserId(profile.user_id)).await?;
        let missing = get_profile(&repo, ProfileLookup::Id(Uuid::now_v7())).await?;

        // Expect
        let found: Value = serde_json::from_str(&found)?;
        assert_eq!(found["id"], profile.id.to_string());
        assert_eq!(found["profile_type"], "STUDENT");
        assert_eq!(found["educations"], serde_json::json!([]));
        assert_eq!(missing, "null");
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_and_search_profiles(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let data = UserProfileFactory::new().generate_many(&pool, 3, ()).await?;
        let repo = UserProfileDbRepository::new(pool);

        // When
        let listed = list_profiles(&repo, &[data[1].id]).await?;
        let searched = search_profiles(&repo, 1, 2, &SearchUsersParams::default()).await?;

        // Expect
        let listed: Value = serde_json::from_str(&listed)?;
        assert_eq!(listed.as_array().map(|x| x.len()), Some(1));
        let searched: Value = serde_json::from_str(&searched)?;
        assert_eq!(searched["total"], 3);
        assert_eq!(searched["page_size"], 2);
        assert_eq!(searched["items"].as_array().map(|x| x.len()), Some(2));
        Ok(())
    }
}
