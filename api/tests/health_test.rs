//! Integration tests for GET /health

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use bomato_api::app::create_app;
use common::{StaticHealthProbe, TestContext};

#[actix_web::test]
async fn test_health_reports_ok() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].is_u64());
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["cache"]["status"], "healthy");
}

#[actix_web::test]
async fn test_health_reports_degraded_dependency() {
    let ctx = TestContext::with_probe(StaticHealthProbe::cache_down());
    let app = test::init_service(create_app(&ctx.config, &ctx.services)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "DEGRADED");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["cache"]["error"], "Connection refused");
}
