use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::{UpdateProfileRequest, UserData};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthenticatedUser;

use super::AppState;

/// Handler for PUT /api/auth/profile
///
/// Updates name and avatar when present and merges preferences field by field.
pub async fn update_profile<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    auth: AuthenticatedUser,
    body: web::Json<UpdateProfileRequest>,
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
        .update_profile(auth.user.id, request.into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(
            ApiResponse::success(UserData::from(user.profile()))
                .with_message("Profile updated successfully"),
        ),
        Err(error) => handle_domain_error(&req, &error),
    }
}
