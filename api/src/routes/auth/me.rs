use actix_web::HttpResponse;

use bomato_shared::types::ApiResponse;

use crate::dto::auth_dto::UserData;
use crate::middleware::auth::AuthenticatedUser;

/// Handler for GET /api/auth/me
///
/// Returns the user loaded by the authentication gate.
pub async fn me(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserData::from(auth.user.profile())))
}
