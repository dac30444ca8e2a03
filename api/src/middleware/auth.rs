//! Authentication middleware for protecting API endpoints.
//!
//! The middleware reads the `Authorization: Bearer <token>` header, runs it
//! through the registered [`Authenticator`] and stores the resulting
//! [`AuthenticatedSubject`] in the request extensions. Handlers read it back
//! with the [`AuthenticatedUser`] or [`MaybeUser`] extractors.
//!
//! Two modes are available:
//! 1. [`RequireAuth`]: any failure ends the request with a 401 envelope
//! 2. [`OptionalAuth`]: failures are ignored and the request continues anonymously

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use bomato_core::errors::{AuthError, DomainError};
use bomato_core::services::gate::{AuthenticatedSubject, Authenticator};
use bomato_shared::config::Environment;

use crate::handlers::error::{domain_error_response, environment_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateMode {
    Required,
    Optional,
}

/// Mandatory authentication: rejects requests without a valid access token
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAuth;

/// Optional authentication: attaches the subject when the token is valid
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalAuth;

macro_rules! gate_transform {
    ($factory:ty, $mode:expr) => {
        impl<S, B> Transform<S, ServiceRequest> for $factory
        where
            S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
            S::Future: 'static,
            B: 'static,
        {
            type Response = ServiceResponse<EitherBody<B>>;
            type Error = Error;
            type InitError = ();
            type Transform = AuthMiddleware<S>;
            type Future = Ready<Result<Self::Transform, Self::InitError>>;

            fn new_transform(&self, service: S) -> Self::Future {
                ready(Ok(AuthMiddleware {
                    service: Rc::new(service),
                    mode: $mode,
                }))
            }
        }
    };
}

gate_transform!(RequireAuth, GateMode::Required);
gate_transform!(OptionalAuth, GateMode::Optional);

/// Authentication middleware service
pub struct AuthMiddleware<S> {
    service: Rc<S>,
    mode: GateMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;

        Box::pin(async move {
            let environment = environment_of(req.request());

            let Some(authenticator) = req.app_data::<web::Data<dyn Authenticator>>().cloned()
            else {
                tracing::error!("No authenticator registered for protected route");
                let error = DomainError::internal("Authenticator not configured");
                return Ok(reject_request(req, &error, environment));
            };

            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            match mode {
                GateMode::Required => match authenticator.require(authorization.as_deref()).await {
                    Ok(subject) => {
                        req.extensions_mut().insert(subject);
                    }
                    Err(e) => {
                        tracing::debug!(path = %req.path(), error = %e, "Authentication failed");
                        return Ok(reject_request(req, &e, environment));
                    }
                },
                GateMode::Optional => {
                    if let Some(subject) = authenticator.optional(authorization.as_deref()).await {
                        req.extensions_mut().insert(subject);
                    }
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Role gate applied after [`RequireAuth`]
///
/// Only checks that a subject is attached; user records carry no role yet,
/// so the listed roles are recorded but not compared.
#[derive(Debug, Clone)]
pub struct Authorize {
    roles: Rc<[String]>,
}

impl Authorize {
    pub fn roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service: Rc::new(service),
            roles: Rc::clone(&self.roles),
        }))
    }
}

/// Role gate middleware service
pub struct AuthorizeMiddleware<S> {
    service: Rc<S>,
    roles: Rc<[String]>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticated = req.extensions().contains::<AuthenticatedSubject>();
        let environment = environment_of(req.request());

        if !authenticated {
            let error = AuthError::AuthenticationRequired.into();
            return Box::pin(async move { Ok(reject_request(req, &error, environment)) });
        }

        tracing::trace!(roles = ?self.roles, "Role gate passed");
        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}

fn reject_request<B>(
    req: ServiceRequest,
    error: &DomainError,
    environment: Environment,
) -> ServiceResponse<EitherBody<B>> {
    req.into_response(domain_error_response(error, environment))
        .map_into_right_body()
}

fn reject(error: DomainError, environment: Environment) -> Error {
    let response = domain_error_response(&error, environment);
    InternalError::from_response(error, response).into()
}

/// Extractor for a caller authenticated by [`RequireAuth`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthenticatedSubject);

impl std::ops::Deref for AuthenticatedUser {
    type Target = AuthenticatedSubject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthenticatedSubject>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| reject(AuthError::AuthenticationRequired.into(), environment_of(req)));

        ready(result)
    }
}

/// Extractor for routes behind [`OptionalAuth`]
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthenticatedSubject>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let subject = req.extensions().get::<AuthenticatedSubject>().cloned();
        ready(Ok(MaybeUser(subject)))
    }
}
