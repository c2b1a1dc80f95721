//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Account, Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{AccountRepository, PostRepository};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL account repository.
pub type PostgresAccountRepository = PostgresBaseRepository<AccountEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, RepoError> {
        tracing::debug!(name, "Finding account by name");

        let result = AccountEntity::find()
            .filter(account::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::OwnerId.eq(owner_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_visible(&self, viewer: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        let published = post::Column::Status.eq(PostStatus::Published.as_str());
        let condition = match viewer {
            Some(viewer) => Condition::any()
                .add(published)
                .add(post::Column::OwnerId.eq(viewer)),
            None => Condition::all().add(published),
        };

        let result = PostEntity::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
