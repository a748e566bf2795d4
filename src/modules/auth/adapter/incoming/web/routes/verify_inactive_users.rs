use actix_web::{post, web, Responder};
use tracing::{error, info};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::auth::application::ports::incoming::use_cases::{
    VerifyInactiveUsersError, VerifyInactiveUsersOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Force-verify idle unverified users
///
/// Verifies every unverified user whose last activity is more than two days
/// old and unlocks all of their enrollments. Meant for a scheduler.
#[utoipa::path(
    post,
    path = "/api/admin/verify-inactive-users",
    tag = "admin",
    responses(
        (
            status = 200,
            description = "Sweep finished",
            body = inline(SuccessResponse<VerifyInactiveUsersOutput>),
            example = json!({ "success": true, "data": { "verifiedCount": 3 } })
        ),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/admin/verify-inactive-users")]
pub async fn verify_inactive_users_handler(
    admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.verify_inactive_users.execute().await {
        Ok(output) => {
            info!(admin_id = %admin.user_id, verified_count = output.verified_count, "Inactive user sweep done");
            ApiResponse::success(output)
        }
        Err(VerifyInactiveUsersError::RepositoryError(e)) => {
            error!(admin_id = %admin.user_id, error = %e, "Inactive user sweep failed");
            ApiResponse::internal_error()
        }
    }
}
