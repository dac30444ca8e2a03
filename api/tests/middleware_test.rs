//! Integration tests for the request middleware stack

mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use serde_json::{json, Value};

use bomato_api::app::create_app;
use bomato_api::middleware::auth::{AuthenticatedUser, Authorize, MaybeUser, OptionalAuth, RequireAuth};
use bomato_api::middleware::rate_limit::{InMemoryRequestCounter, RateLimiter, RATE_LIMIT_MESSAGE};
use bomato_shared::config::RateLimitConfig;
use common::{access_token, post_json, registration, test_config, user_id, with_bearer, TestContext};

async fn whoami(user: MaybeUser) -> HttpResponse {
    let email = user.0.map(|subject| subject.user.email);
    HttpResponse::Ok().json(json!({ "email": email }))
}

async fn admin(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "id": user.user.id }))
}

#[actix_web::test]
async fn test_unknown_route_returns_envelope() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "error": "Route not found" }));
}

#[actix_web::test]
async fn test_malformed_json_is_rejected_with_envelope() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request body");
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn test_security_headers_on_success_and_rejection() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
    assert!(headers.get("strict-transport-security").is_none());

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
}

#[actix_web::test]
async fn test_hsts_only_in_production() {
    let ctx = TestContext::with_config(test_config(&[("NODE_ENV", "production")]));
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("strict-transport-security").is_some());
}

#[actix_web::test]
async fn test_cors_allows_frontend_origin() {
    let ctx = TestContext::with_config(test_config(&[("FRONTEND_URL", "https://app.bomato.test")]));
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Origin", "https://app.bomato.test"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "https://app.bomato.test"
    );
    assert_eq!(
        resp.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[actix_web::test]
async fn test_rate_limit_rejects_after_max_requests() {
    let ctx = TestContext::with_config(test_config(&[("RATE_LIMIT_MAX_REQUESTS", "2")]));
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    for remaining in ["1", "0"] {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-ratelimit-limit").unwrap(), "2");
        assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), remaining);
    }

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().get("retry-after").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "error": RATE_LIMIT_MESSAGE }));
}

#[actix_web::test]
async fn test_rate_limit_disabled_passes_through() {
    let config = RateLimitConfig {
        enabled: false,
        max_requests: 0,
        window_seconds: 60,
    };
    let app = test::init_service(
        App::new()
            .wrap(RateLimiter::new(Arc::new(InMemoryRequestCounter::new()), config))
            .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("x-ratelimit-limit").is_none());
}

#[actix_web::test]
async fn test_optional_auth_attaches_subject_when_valid() {
    let ctx = TestContext::new();
    let api = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = post_json("/api/auth/register", &registration("a@x.com", "+15551234567")).to_request();
    let registered: Value = test::read_body_json(test::call_service(&api, req).await).await;
    ctx.verify(user_id(&registered)).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&ctx.services.authenticator)))
            .service(
                web::resource("/whoami")
                    .wrap(OptionalAuth)
                    .route(web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], Value::Null);

    let req = with_bearer(test::TestRequest::get().uri("/whoami"), "garbage").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], Value::Null);

    let req = with_bearer(
        test::TestRequest::get().uri("/whoami"),
        &access_token(&registered),
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "a@x.com");
}

#[actix_web::test]
async fn test_authorize_requires_authenticated_subject() {
    let ctx = TestContext::new();
    let api = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let req = post_json("/api/auth/register", &registration("a@x.com", "+15551234567")).to_request();
    let registered: Value = test::read_body_json(test::call_service(&api, req).await).await;
    ctx.verify(user_id(&registered)).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&ctx.services.authenticator)))
            .service(
                web::resource("/admin")
                    .wrap(Authorize::roles(["admin"]))
                    .wrap(RequireAuth)
                    .route(web::get().to(admin)),
            )
            .service(
                web::resource("/unguarded")
                    .wrap(Authorize::roles(["admin"]))
                    .route(web::get().to(admin)),
            ),
    )
    .await;

    let req = with_bearer(
        test::TestRequest::get().uri("/admin"),
        &access_token(&registered),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/unguarded").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Authentication required");
}

#[actix_web::test]
async fn test_extractor_without_gate_is_rejected() {
    let app = test::init_service(App::new().route("/admin", web::get().to(admin))).await;

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Authentication required");
}

#[actix_web::test]
async fn test_missing_authenticator_is_internal_error() {
    let app = test::init_service(
        App::new().service(
            web::resource("/admin")
                .wrap(RequireAuth)
                .route(web::get().to(admin)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
}
