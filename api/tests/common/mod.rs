//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use actix_web::test::TestRequest;
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use bomato_api::app::Services;
use bomato_api::handlers::health::HealthProbe;
use bomato_api::middleware::rate_limit::InMemoryRequestCounter;
use bomato_core::repositories::{MockTokenRepository, MockUserRepository};
use bomato_shared::config::AppConfig;
use bomato_shared::types::ServiceHealth;

pub const PASSWORD: &str = "Password1";

/// Probe returning a fixed report
pub struct StaticHealthProbe {
    services: BTreeMap<String, ServiceHealth>,
}

impl StaticHealthProbe {
    pub fn healthy() -> Self {
        let mut services = BTreeMap::new();
        services.insert("database".to_string(), ServiceHealth::healthy());
        services.insert("cache".to_string(), ServiceHealth::healthy());
        Self { services }
    }

    pub fn cache_down() -> Self {
        let mut probe = Self::healthy();
        probe.services.insert(
            "cache".to_string(),
            ServiceHealth::unhealthy("Connection refused"),
        );
        probe
    }
}

#[async_trait]
impl HealthProbe for StaticHealthProbe {
    async fn check(&self) -> BTreeMap<String, ServiceHealth> {
        self.services.clone()
    }
}

/// Configuration with test secrets and the cheapest bcrypt cost
pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("NODE_ENV", "test"),
        ("JWT_SECRET", "test-access-secret"),
        ("JWT_REFRESH_SECRET", "test-refresh-secret"),
        ("BCRYPT_COST", "4"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    AppConfig::from_map(&vars).expect("test configuration should be valid")
}

/// Application services over in-memory stores, with handles for inspection
pub struct TestContext {
    pub config: AppConfig,
    pub users: MockUserRepository,
    pub tokens: MockTokenRepository,
    pub services: Services<MockUserRepository, MockTokenRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(test_config(&[]), StaticHealthProbe::healthy())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, StaticHealthProbe::healthy())
    }

    pub fn with_probe(probe: StaticHealthProbe) -> Self {
        Self::build(test_config(&[]), probe)
    }

    fn build(config: AppConfig, probe: StaticHealthProbe) -> Self {
        let users = MockUserRepository::new();
        let tokens = MockTokenRepository::new();
        let services = Services::new(
            &config,
            Arc::new(users.clone()),
            tokens.clone(),
            Arc::new(InMemoryRequestCounter::new()),
            Arc::new(probe),
        );

        Self {
            config,
            users,
            tokens,
            services,
        }
    }

    /// Mark both email and phone as verified
    pub async fn verify(&self, user_id: Uuid) {
        assert!(
            self.users
                .modify(user_id, |user| {
                    user.email_verified = true;
                    user.phone_verified = true;
                })
                .await
        );
    }
}

pub fn registration(email: &str, phone: &str) -> Value {
    json!({
        "name": "Ann Lee",
        "email": email,
        "phone": phone,
        "password": PASSWORD,
    })
}

pub fn post_json(uri: &str, body: &Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

pub fn with_bearer(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header(("Authorization", format!("Bearer {}", token)))
}

/// User id from a register or login response
pub fn user_id(body: &Value) -> Uuid {
    body["data"]["user"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("response should carry a user id")
}

pub fn access_token(body: &Value) -> String {
    body["data"]["accessToken"]
        .as_str()
        .expect("response should carry an access token")
        .to_string()
}

pub fn refresh_token(body: &Value) -> String {
    body["data"]["refreshToken"]
        .as_str()
        .expect("response should carry a refresh token")
        .to_string()
}
