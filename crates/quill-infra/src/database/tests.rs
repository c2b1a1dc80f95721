use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, SqlErr};
use uuid::Uuid;

use quill_core::domain::{Account, NewPost, Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{AccountRepository, BaseRepository, PostRepository};
use quill_core::{DomainError, PostService};

use crate::database::entity::{account, post};
use crate::database::postgres_base::classify_write_error;
use crate::database::postgres_repo::{PostgresAccountRepository, PostgresPostRepository};

fn post_model(owner_id: Uuid, status: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        owner_id,
        title: "Test Post".to_owned(),
        summary: None,
        body: "Content".to_owned(),
        status: status.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let owner_id = Uuid::new_v4();
    let model = post_model(owner_id, "published");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.owner_id, owner_id);
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_unknown_status_reads_as_draft() {
    let model = post_model(Uuid::new_v4(), "archived");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert!(post.is_draft());
}

#[tokio::test]
async fn test_find_visible_maps_rows() {
    let viewer = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model(viewer, "draft"),
            post_model(Uuid::new_v4(), "published"),
        ]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_visible(Some(viewer)).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().any(|p| p.owner_id == viewer && p.is_draft()));
}

#[tokio::test]
async fn test_update_of_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post: Post = post_model(Uuid::new_v4(), "draft").into();
    let result = repo.update(post).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_without_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_insert_account_returns_stored_row() {
    let account = Account::new("alice".to_owned(), "$argon2id$hash".to_owned());
    let row = account::Model {
        id: account.id,
        name: account.name.clone(),
        password_hash: account.password_hash.clone(),
        created_at: account.created_at.into(),
        updated_at: account.updated_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row.clone()], vec![row]])
        .into_connection();
    let repo = PostgresAccountRepository::new(db);

    let stored = repo.insert(account.clone()).await.unwrap();
    assert_eq!(stored.id, account.id);

    let found = repo.find_by_name("alice").await.unwrap().unwrap();
    assert_eq!(found.password_hash, "$argon2id$hash");
}

#[test]
fn test_unique_violation_is_constraint() {
    let err = classify_write_error(
        Some(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"accounts_name_key\"".to_owned(),
        )),
        DbErr::Custom("unique".to_owned()),
    );

    assert!(matches!(err, RepoError::Constraint(_)));
    assert!(matches!(DomainError::from(err), DomainError::Conflict(_)));
}

#[test]
fn test_foreign_key_violation_is_not_found() {
    let err = classify_write_error(
        Some(SqlErr::ForeignKeyConstraintViolation(
            "insert or update on table \"posts\" violates foreign key constraint \"fk_posts_owner\""
                .to_owned(),
        )),
        DbErr::Custom("fk".to_owned()),
    );

    assert!(matches!(err, RepoError::NotFound));
}

#[test]
fn test_other_write_errors_are_query_errors() {
    let err = classify_write_error(None, DbErr::Custom("boom".to_owned()));

    assert!(matches!(err, RepoError::Query(_)));
}

#[tokio::test]
async fn test_create_post_for_missing_owner_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<account::Model>::new()])
        .into_connection();
    let posts = PostService::new(
        Arc::new(PostgresPostRepository::new(db.clone())),
        Arc::new(PostgresAccountRepository::new(db)),
    );

    let result = posts
        .create(
            Uuid::new_v4(),
            NewPost {
                title: "Orphan".to_owned(),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::Unauthorized)));
}
