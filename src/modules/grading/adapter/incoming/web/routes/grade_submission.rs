use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::grading::application::domain::entities::Submission;
use crate::modules::grading::application::ports::incoming::use_cases::{
    GradeSubmissionError, GradeSubmissionInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct GradeSubmissionRequestDto {
    #[schema(example = 92)]
    pub grade: i32,
    #[serde(default)]
    #[schema(example = "Solid error handling")]
    pub feedback: Option<String>,
}

/// Grade a submission (admin)
#[utoipa::path(
    post,
    path = "/api/admin/submissions/{submission_id}/grade",
    tag = "grading",
    params(("submission_id" = Uuid, Path, description = "Submission id")),
    request_body = GradeSubmissionRequestDto,
    responses(
        (status = 200, description = "Submission graded", body = inline(SuccessResponse<Submission>)),
        (status = 400, description = "Grade outside 0-100", body = ErrorResponse,
            example = json!({"success": false, "error": {"code": "INVALID_GRADE", "message": "Grade must be between 0 and 100"}})),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Submission not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/admin/submissions/{submission_id}/grade")]
pub async fn grade_submission_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<GradeSubmissionRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let submission_id = path.into_inner();
    let dto = req.into_inner();
    let input = GradeSubmissionInput {
        submission_id,
        grade: dto.grade,
        feedback: dto.feedback,
        grader_id: admin.user_id,
    };

    match data.grading.grade.execute(input).await {
        Ok(submission) => ApiResponse::success(submission),
        Err(GradeSubmissionError::InvalidGrade(_)) => {
            ApiResponse::bad_request("INVALID_GRADE", "Grade must be between 0 and 100")
        }
        Err(GradeSubmissionError::SubmissionNotFound) => {
            ApiResponse::not_found("SUBMISSION_NOT_FOUND", "Submission not found")
        }
        Err(GradeSubmissionError::RepositoryError(e)) => {
            error!(submission_id = %submission_id, error = %e, "Failed to grade submission");
            ApiResponse::internal_error()
        }
    }
}
