use actix_web::{get, web, Responder};
use tracing::{error, warn};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::domain::entities::UserProfile;
use crate::modules::auth::application::ports::incoming::use_cases::FetchProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Current user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = inline(SuccessResponse<UserProfile>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/auth/me")]
pub async fn me_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.auth.fetch_profile.execute(user.user_id).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(FetchProfileError::UserNotFound) => {
            warn!(user_id = %user.user_id, "Session refers to unknown user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchProfileError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to fetch profile");
            ApiResponse::internal_error()
        }
    }
}
