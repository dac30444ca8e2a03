use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use bomato_core::repositories::{TokenRepository, UserRepository};
use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::RefreshTokenRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/auth/refresh-token
///
/// Exchanges a refresh token for a new `{accessToken, refreshToken}` pair.
///
/// ## Errors
/// - 400 Bad Request: `refreshToken` missing
/// - 401 Unauthorized: Token invalid, expired or of the wrong type, user
///   deleted, or email/phone not yet verified
pub async fn refresh_token<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    body: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok()
            .json(ApiResponse::success(tokens).with_message("Tokens refreshed successfully")),
        Err(error) => handle_domain_error(&req, &error),
    }
}
