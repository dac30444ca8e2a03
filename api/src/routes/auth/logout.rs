use actix_web::{web, HttpResponse};

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::middleware::auth::AuthenticatedUser;

use super::AppState;

/// Handler for POST /api/auth/logout
///
/// Revokes the presented access token until it expires. Always answers
/// 200, even when the denylist could not be written.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
pub async fn logout<U, T>(state: web::Data<AppState<U, T>>, auth: AuthenticatedUser) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(error) = state.auth_service.logout(&auth.claims).await {
        tracing::error!(user_id = %auth.user.id, error = %error, "Logout failed");
    }

    HttpResponse::Ok().json(ApiResponse::<()>::message("Logout successful"))
}
