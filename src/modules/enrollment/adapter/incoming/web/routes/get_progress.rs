use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::domain::entities::LessonProgress;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Completed lessons of a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/progress",
    tag = "enrollments",
    params(("course_id" = String, Path, description = "Course id", example = "ai-agents")),
    responses(
        (status = 200, description = "Completed lessons", body = inline(SuccessResponse<Vec<LessonProgress>>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/courses/{course_id}/progress")]
pub async fn get_progress_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = path.into_inner();

    match data
        .enrollment
        .get_progress
        .execute(user.user_id, &course_id)
        .await
    {
        Ok(progress) => ApiResponse::success(progress),
        Err(e) => {
            error!(user_id = %user.user_id, course_id = %course_id, error = %e, "Failed to load progress");
            ApiResponse::internal_error()
        }
    }
}
