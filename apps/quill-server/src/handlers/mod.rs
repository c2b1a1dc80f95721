//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/password", web::put().to(auth::change_password)),
            )
            // Post routes; `/mine` must precede `/{id}`
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/mine", web::get().to(posts::list_mine))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use quill_infra::JwtConfig;
    use quill_shared::dto::AuthResponse;

    use super::configure_routes;
    use crate::state::AppState;

    const PASSWORD: &str = "password-123";

    fn test_state() -> AppState {
        AppState::in_memory(JwtConfig {
            secret: "handler-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "quill-test".to_string(),
        })
        .unwrap()
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! register {
        ($app:expr, $name:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({ "name": $name, "password": PASSWORD }))
                .to_request();
            let body: AuthResponse = test::call_and_read_body_json(&$app, req).await;
            body.access_token
        }};
    }

    fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    macro_rules! create_post {
        ($app:expr, $token:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .insert_header(bearer(&$token))
                .set_json($body)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            body["data"]["id"].as_str().unwrap().to_string()
        }};
    }

    macro_rules! visible_titles {
        ($app:expr, $token:expr) => {{
            let mut req = test::TestRequest::get().uri("/api/posts");
            if let Some(token) = $token {
                req = req.insert_header(bearer(token));
            }
            let body: Value = test::call_and_read_body_json(&$app, req.to_request()).await;
            body["data"]["posts"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["title"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        }};
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");
    }

    #[actix_web::test]
    async fn test_draft_visible_only_to_owner() {
        let app = app!();
        let alice = register!(app, "alice");
        let bob = register!(app, "bob");

        create_post!(app, alice, json!({ "title": "X", "body": "secret" }));

        assert!(!visible_titles!(app, Some(&bob)).contains(&"X".to_string()));
        assert!(!visible_titles!(app, None::<&String>).contains(&"X".to_string()));
        assert!(visible_titles!(app, Some(&alice)).contains(&"X".to_string()));
    }

    #[actix_web::test]
    async fn test_non_owner_gets_forbidden_and_not_found() {
        let app = app!();
        let alice = register!(app, "alice");
        let bob = register!(app, "bob");
        let id = create_post!(app, alice, json!({ "title": "Draft" }));

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", id))
            .insert_header(bearer(&bob))
            .set_json(json!({ "title": "Hijacked" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", id))
            .insert_header(bearer(&bob))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", id))
            .insert_header(bearer(&bob))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_owner_publishes_and_deletes() {
        let app = app!();
        let alice = register!(app, "alice");
        let id = create_post!(app, alice, json!({ "title": "Launch", "summary": "Soon" }));

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", id))
            .insert_header(bearer(&alice))
            .set_json(json!({ "status": "published" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "published");
        assert_eq!(body["data"]["summary"], "Soon");

        assert_eq!(visible_titles!(app, None::<&String>), vec!["Launch"]);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", id))
            .insert_header(bearer(&alice))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        assert!(visible_titles!(app, None::<&String>).is_empty());
    }

    #[actix_web::test]
    async fn test_duplicate_registration_conflicts() {
        let app = app!();
        register!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "name": "alice", "password": "another-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_login_and_password_change() {
        let app = app!();
        let token = register!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "name": "alice", "password": "wrong-password" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::put()
            .uri("/api/auth/password")
            .insert_header(bearer(&token))
            .set_json(json!({ "current_password": PASSWORD, "new_password": "rotated-secret" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "name": "alice", "password": "rotated-secret" }))
            .to_request();
        let body: AuthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.account.name, "alice");

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&body.access_token))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["data"]["name"], "alice");
    }

    #[actix_web::test]
    async fn test_protected_routes_require_token() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Anonymous" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(bearer("not-a-jwt"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_invalid_input_is_rejected() {
        let app = app!();
        let alice = register!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "   " }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "Title", "status": "archived" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let req = test::TestRequest::get()
            .uri("/api/posts/not-a-uuid")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_token_for_unknown_account_cannot_create_posts() {
        let issuing = app!();
        let alice = register!(issuing, "alice");

        // Same signing key, empty account store.
        let restarted = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "Orphan" }))
            .to_request();
        assert_eq!(
            test::call_service(&restarted, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        assert!(visible_titles!(restarted, Some(&alice)).is_empty());
    }
}
