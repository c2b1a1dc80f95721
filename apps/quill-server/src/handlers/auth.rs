//! Account handlers: registration, login, credential rotation.

use actix_web::{HttpResponse, web};

use quill_core::domain::Account;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AccountResponse, AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn account_response(account: &Account) -> AccountResponse {
    AccountResponse {
        id: account.id.to_string(),
        name: account.name.clone(),
        created_at: account.created_at.to_rfc3339(),
    }
}

fn issue_token(state: &AppState, account: &Account) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(account.id, &account.name)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        account: account_response(account),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let account = state.accounts.register(&req.name, &req.password).await?;

    Ok(HttpResponse::Created().json(issue_token(&state, &account)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let account = state.accounts.authenticate(&req.name, &req.password).await?;
    tracing::info!(account_id = %account.id, "Login succeeded");

    Ok(HttpResponse::Ok().json(issue_token(&state, &account)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let account = state.accounts.find(identity.account_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(account_response(&account))))
}

/// PUT /api/auth/password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state
        .accounts
        .change_password(identity.account_id, &req.current_password, &req.new_password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
