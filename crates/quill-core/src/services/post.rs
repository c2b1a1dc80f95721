use std::sync::Arc;

use uuid::Uuid;

use super::or_not_found;
use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::policy;
use crate::ports::{AccountRepository, BaseRepository, PostRepository};

/// Post CRUD gated by the access policy.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { posts, accounts }
    }

    /// Create a post owned by `owner_id`. The owner must be a stored account;
    /// a token outliving its account is treated as unauthenticated.
    pub async fn create(&self, owner_id: Uuid, new_post: NewPost) -> Result<Post, DomainError> {
        let post = Post::create(owner_id, new_post)?;

        if self.accounts.find_by_id(owner_id).await?.is_none() {
            tracing::warn!(%owner_id, "Post rejected: owner account does not exist");
            return Err(DomainError::Unauthorized);
        }

        // The owner can still vanish between the check and the insert.
        let post = self.posts.insert(post).await.map_err(|err| match err {
            RepoError::NotFound => DomainError::Unauthorized,
            other => other.into(),
        })?;

        tracing::info!(post_id = %post.id, %owner_id, status = %post.status, "Post created");
        Ok(post)
    }

    /// Fetch a single post. Posts the viewer may not see are reported as
    /// missing so drafts do not leak their existence.
    pub async fn get(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .filter(|post| policy::can_view(post, viewer))
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }

    pub async fn update(
        &self,
        post_id: Uuid,
        actor: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.load(post_id).await?;
        policy::authorize_edit(&post, actor)?;

        post.apply(changes)?;
        let post = self
            .posts
            .update(post)
            .await
            .map_err(or_not_found("Post", post_id))?;

        tracing::info!(%post_id, status = %post.status, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, post_id: Uuid, actor: Uuid) -> Result<(), DomainError> {
        let post = self.load(post_id).await?;
        policy::authorize_delete(&post, actor)?;

        self.posts
            .delete(post_id)
            .await
            .map_err(or_not_found("Post", post_id))?;

        tracing::info!(%post_id, "Post deleted");
        Ok(())
    }

    /// Published posts plus the viewer's own drafts, newest first.
    pub async fn list_visible(&self, viewer: Option<Uuid>) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.find_visible(viewer).await?;
        posts.retain(|post| policy::can_view(post, viewer));
        newest_first(&mut posts);
        Ok(posts)
    }

    /// Every post of `owner_id`, drafts included, newest first.
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.find_by_owner(owner_id).await?;
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn load(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
