//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Account, Post};
use quill_core::error::RepoError;
use quill_core::ports::{AccountRepository, BaseRepository, PostRepository};

/// Account store backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(accounts: &HashMap<Uuid, Account>, name: &str, except: Uuid) -> bool {
    accounts
        .values()
        .any(|account| account.id != except && account.name == name)
}

#[async_trait]
impl BaseRepository<Account, Uuid> for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, RepoError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.id) || name_taken(&accounts, &account.name, account.id) {
            return Err(RepoError::Constraint("Account already exists".to_string()));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepoError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(RepoError::NotFound);
        }
        if name_taken(&accounts, &account.name, account.id) {
            return Err(RepoError::Constraint("Account already exists".to_string()));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, RepoError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.name == name).cloned())
    }
}

/// Post store backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut matching: Vec<Post> = posts.values().filter(|p| keep(*p)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        match posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.owner_id == owner_id).await)
    }

    async fn find_visible(&self, viewer: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .collect(|p| p.status.is_published() || Some(p.owner_id) == viewer)
            .await)
    }
}
