//! Application services - the account and post stores.
//!
//! Services own the request-level rules: input validation, the access policy,
//! and translating repository failures into [`DomainError`]s.

mod account;
mod post;

pub use account::AccountService;
pub use post::PostService;

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Map a repository `NotFound` to a typed domain `NotFound`.
fn or_not_found(entity_type: &'static str, id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
