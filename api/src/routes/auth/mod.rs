//! Authentication route handlers
//!
//! This module contains all `/api/auth` endpoints:
//! - Registration and login
//! - Token refresh
//! - Current user, profile update and password change
//! - Logout (access token revocation)

pub mod change_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod profile;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use actix_web::web;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_core::services::auth::AuthService;

use crate::middleware::auth::RequireAuth;

/// Shared state for the auth handlers
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
}

impl<U, T> AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, T>>) -> Self {
        Self { auth_service }
    }
}

/// Mount the `/api/auth` scope
pub fn configure<U, T>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register::register::<U, T>))
            .route("/login", web::post().to(login::login::<U, T>))
            .route("/refresh-token", web::post().to(refresh::refresh_token::<U, T>))
            .service(
                web::resource("/me")
                    .wrap(RequireAuth)
                    .route(web::get().to(me::me)),
            )
            .service(
                web::resource("/logout")
                    .wrap(RequireAuth)
                    .route(web::post().to(logout::logout::<U, T>)),
            )
            .service(
                web::resource("/profile")
                    .wrap(RequireAuth)
                    .route(web::put().to(profile::update_profile::<U, T>)),
            )
            .service(
                web::resource("/change-password")
                    .wrap(RequireAuth)
                    .route(web::put().to(change_password::change_password::<U, T>)),
            ),
    );
}
