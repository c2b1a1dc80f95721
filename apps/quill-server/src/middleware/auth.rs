//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use quill_core::ports::{AuthError, TokenClaims};
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated account extractor.
///
/// Use this in handlers to require a valid bearer token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub account_id: Uuid,
    pub name: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            account_id: claims.account_id,
            name: claims.name,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized("Invalid credentials"),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Validate the bearer token of `req`, or `None` if no Authorization header is present.
fn identity_from(req: &HttpRequest) -> Option<Result<Identity, AuthError>> {
    let auth_header = req.headers().get(header::AUTHORIZATION)?;

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Some(Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        )));
    };

    let result = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
        })
        .and_then(|token| state.tokens.validate_token(token.trim()))
        .map(Identity::from);

    Some(result)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = identity_from(req)
            .unwrap_or(Err(AuthError::MissingAuth))
            .map_err(AuthenticationError);
        ready(result)
    }
}

/// Optional identity extractor for routes that also serve anonymous readers.
///
/// A missing Authorization header yields `None`; a present but invalid token
/// is still rejected.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn account_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|identity| identity.account_id)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = identity_from(req)
            .transpose()
            .map(OptionalIdentity)
            .map_err(AuthenticationError);
        ready(result)
    }
}
