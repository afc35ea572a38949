use async_trait::async_trait;
use uuid::Uuid;

use super::{page::Page, profile::UserProfileProps, search::SearchUsersParams};

/// Storage contract for student profiles.
///
/// Lookups return `None` (or an empty list) when nothing matches. Paginated
/// operations fail with [`crate::core::error::DomainError`] when `page` or
/// `page_size` is below 1.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<UserProfileProps>>;

    async fn get_profile_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserProfileProps>>;

    async fn get_by_parent_code(
        &self,
        parent_code: &str,
    ) -> anyhow::Result<Option<UserProfileProps>>;

    async fn create_profile(&self, entity: &UserProfileProps) -> anyhow::Result<()>;

    async fn update_profile(&self, entity: &UserProfileProps) -> anyhow::Result<()>;

    async fn get_profiles(&self, include_profile_ids: &[Uuid])
        -> anyhow::Result<Vec<UserProfileProps>>;

    async fn get_suggested_users(
        &self,
        user_id: Uuid,
        include_profile_ids: &[Uuid],
        exclude_profile_ids: &[Uuid],
        page: i64,
        page_size: i64,
        text: &str,
    ) -> anyhow::Result<Page<UserProfileProps>>;

    async fn get_searched_users(
        &self,
        page: i64,
        page_size: i64,
        search_user_params: &SearchUsersParams,
    ) -> anyhow::Result<Page<UserProfileProps>>;
}
