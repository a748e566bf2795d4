use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::ports::incoming::use_cases::{
    AccessCheckOutput, CheckAccessError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Check current access to a course
///
/// Unverified users are always denied with reason `Email not verified`.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/access",
    tag = "enrollments",
    params(("course_id" = String, Path, description = "Course id", example = "ai-agents")),
    responses(
        (
            status = 200,
            description = "Access decision",
            body = inline(SuccessResponse<AccessCheckOutput>),
            example = json!({ "success": true, "data": { "hasAccess": false, "reason": "Access expired" } })
        ),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/courses/{course_id}/access")]
pub async fn check_access_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = path.into_inner();

    match data
        .enrollment
        .check_access
        .execute(user.user_id, &course_id)
        .await
    {
        Ok(output) => ApiResponse::success(output),
        Err(CheckAccessError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(CheckAccessError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, course_id = %course_id, error = %e, "Access check failed");
            ApiResponse::internal_error()
        }
    }
}
