use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::domain::entities::LessonProgress;
use crate::modules::enrollment::application::domain::policies::AccessDenial;
use crate::modules::enrollment::application::ports::incoming::use_cases::RecordLessonProgressError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompleteRequestDto {
    #[schema(example = "ai-agents")]
    pub course_id: String,
}

/// Mark a lesson completed
#[utoipa::path(
    post,
    path = "/api/lessons/{lesson_id}/complete",
    tag = "enrollments",
    params(("lesson_id" = String, Path, description = "Lesson id", example = "lesson-1")),
    request_body = LessonCompleteRequestDto,
    responses(
        (status = 200, description = "Lesson recorded", body = inline(SuccessResponse<LessonProgress>)),
        (status = 400, description = "Email not verified", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 403, description = "No current access to the course", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/lessons/{lesson_id}/complete")]
pub async fn record_lesson_progress_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<LessonCompleteRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let lesson_id = path.into_inner();
    let course_id = req.into_inner().course_id;

    match data
        .enrollment
        .record_lesson
        .execute(user.user_id, &course_id, &lesson_id)
        .await
    {
        Ok(progress) => ApiResponse::success(progress),
        Err(RecordLessonProgressError::AccessDenied(AccessDenial::EmailNotVerified)) => {
            ApiResponse::bad_request("VERIFICATION_REQUIRED", "Email not verified")
        }
        Err(RecordLessonProgressError::AccessDenied(AccessDenial::AccessExpired)) => {
            ApiResponse::forbidden("FORBIDDEN", "Access expired")
        }
        Err(RecordLessonProgressError::AccessDenied(_)) => {
            ApiResponse::forbidden("FORBIDDEN", "You do not have access to this course")
        }
        Err(RecordLessonProgressError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(RecordLessonProgressError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(RecordLessonProgressError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, course_id = %course_id, lesson_id = %lesson_id, error = %e, "Failed to record lesson");
            ApiResponse::internal_error()
        }
    }
}
