use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::RegisterRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

pub const REGISTERED_MESSAGE: &str =
    "User registered successfully. Please verify your email and phone.";

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// { "name": "Ann", "email": "a@x.com", "phone": "+15551234567", "password": "Abcdef12" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "User registered successfully. Please verify your email and phone.",
///     "data": { "user": { "id": "...", "emailVerified": false, ... },
///               "accessToken": "eyJ...", "refreshToken": "eyJ..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Validation failure, email or phone already registered
pub async fn register<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.register(request.into()).await {
        Ok(auth) => {
            HttpResponse::Created().json(ApiResponse::success(auth).with_message(REGISTERED_MESSAGE))
        }
        Err(error) => handle_domain_error(&req, &error),
    }
}
