use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::LoginRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/auth/login
///
/// Unknown email and wrong password both answer 401 "Invalid email or password".
pub async fn login<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(auth) => HttpResponse::Ok().json(ApiResponse::success(auth).with_message("Login successful")),
        Err(error) => handle_domain_error(&req, &error),
    }
}
