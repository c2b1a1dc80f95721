//! Post access policy.
//!
//! Ownership is the only rule: owners may do anything with their posts,
//! everyone else (including anonymous viewers) may only read published ones.
//! These are plain predicates over a post and an acting identity; they hold no
//! state and perform no I/O.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;

/// True if `actor` owns `post`.
pub fn is_owner(post: &Post, actor: Uuid) -> bool {
    post.owner_id == actor
}

/// Published posts are visible to all, drafts only to their owner.
pub fn can_view(post: &Post, viewer: Option<Uuid>) -> bool {
    post.status.is_published() || viewer.is_some_and(|id| is_owner(post, id))
}

pub fn can_edit(post: &Post, actor: Uuid) -> bool {
    is_owner(post, actor)
}

pub fn can_delete(post: &Post, actor: Uuid) -> bool {
    is_owner(post, actor)
}

/// [`can_edit`] as a `Result`, failing with [`DomainError::Forbidden`].
pub fn authorize_edit(post: &Post, actor: Uuid) -> Result<(), DomainError> {
    if can_edit(post, actor) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

/// [`can_delete`] as a `Result`, failing with [`DomainError::Forbidden`].
pub fn authorize_delete(post: &Post, actor: Uuid) -> Result<(), DomainError> {
    if can_delete(post, actor) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
