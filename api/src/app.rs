//! Application state and factory
//!
//! This module wires the services into shared state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_core::services::auth::{AuthService, AuthServiceConfig};
use bomato_core::services::gate::{Authenticator, RequestGate};
use bomato_core::services::password::PasswordHasher;
use bomato_core::services::token::{TokenService, TokenServiceConfig};
use bomato_shared::config::AppConfig;

use crate::handlers::error::{json_error_handler, not_found};
use crate::handlers::health::{health, HealthProbe, HealthState};
use crate::middleware::{cors::create_cors, rate_limit::RateLimiter, rate_limit::RequestCounter};
use crate::middleware::security::SecurityHeaders;
use crate::routes::auth::{configure, AppState};

/// Services shared by every worker
pub struct Services<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub authenticator: Arc<dyn Authenticator>,
    pub request_counter: Arc<dyn RequestCounter>,
    pub health: HealthState,
}

impl<U, T> Clone for Services<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            authenticator: Arc::clone(&self.authenticator),
            request_counter: Arc::clone(&self.request_counter),
            health: self.health.clone(),
        }
    }
}

impl<U, T> Services<U, T>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    /// Build the token service, request gate and auth service from configuration
    pub fn new(
        config: &AppConfig,
        user_repository: Arc<U>,
        token_repository: T,
        request_counter: Arc<dyn RequestCounter>,
        health_probe: Arc<dyn HealthProbe>,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(
            token_repository,
            TokenServiceConfig::from(&config.jwt),
        ));

        let gate = RequestGate::new(Arc::clone(&user_repository), Arc::clone(&token_service));

        let auth_service = AuthService::new(
            user_repository,
            token_service,
            PasswordHasher::from_config(&config.password),
            AuthServiceConfig::default(),
        );

        Self {
            auth_service: Arc::new(auth_service),
            authenticator: Arc::new(gate),
            request_counter,
            health: HealthState::new(health_probe),
        }
    }
}

/// Create and configure the application with all dependencies
///
/// Middleware runs outermost first: request tracing, CORS, security
/// headers, then the rate limiter. Rejections produced further in are still
/// decorated by the outer layers.
pub fn create_app<U, T>(
    config: &AppConfig,
    services: &Services<U, T>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(web::Data::new(config.environment))
        .app_data(web::Data::new(AppState::new(Arc::clone(&services.auth_service))))
        .app_data(web::Data::from(Arc::clone(&services.authenticator)))
        .app_data(web::Data::new(services.health.clone()))
        .app_data(json_config)
        .wrap(RateLimiter::new(
            Arc::clone(&services.request_counter),
            config.rate_limit.clone(),
        ))
        .wrap(SecurityHeaders::for_environment(config.environment))
        .wrap(create_cors(&config.server))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health))
        .configure(configure::<U, T>)
        .default_service(web::route().to(not_found))
}
