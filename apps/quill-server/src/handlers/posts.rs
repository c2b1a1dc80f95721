//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostChanges, PostStatus};
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        owner_id: post.owner_id.to_string(),
        title: post.title,
        summary: post.summary,
        body: post.body,
        status: post.status.to_string(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn list_response(posts: Vec<Post>) -> ApiResponse<PostListResponse> {
    let posts: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    ApiResponse::ok(PostListResponse {
        total: posts.len(),
        posts,
    })
}

fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid post id '{}'", raw)))
}

fn parse_status(raw: Option<String>) -> AppResult<Option<PostStatus>> {
    Ok(raw.map(|s| s.parse::<PostStatus>()).transpose()?)
}

/// GET /api/posts - published posts plus the caller's drafts.
pub async fn list(state: web::Data<AppState>, viewer: OptionalIdentity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_visible(viewer.account_id()).await?;

    Ok(HttpResponse::Ok().json(list_response(posts)))
}

/// GET /api/posts/mine
pub async fn list_mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_owned(identity.account_id).await?;

    Ok(HttpResponse::Ok().json(list_response(posts)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost {
        title: req.title,
        body: req.body,
        summary: req.summary,
        status: parse_status(req.status)?,
    };

    let post = state.posts.create(identity.account_id, new_post).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// GET /api/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let post = state.posts.get(post_id, viewer.account_id()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        body: req.body,
        summary: req.summary,
        status: parse_status(req.status)?,
    };

    let post = state
        .posts
        .update(post_id, identity.account_id, changes)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    state.posts.delete(post_id, identity.account_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_id.to_string(),
        "Post deleted",
    )))
}
