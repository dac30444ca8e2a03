use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::ChangePasswordRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthenticatedUser;

use super::AppState;

/// Handler for PUT /api/auth/change-password
///
/// ## Errors
/// - 400 Bad Request: Missing field, new password fails the policy, or the
///   current password is incorrect
pub async fn change_password<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    auth: AuthenticatedUser,
    body: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .change_password(auth.user.id, &request.current_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message("Password updated successfully")),
        Err(error) => handle_domain_error(&req, &error),
    }
}
