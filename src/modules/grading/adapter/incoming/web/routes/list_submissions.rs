use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::grading::application::domain::entities::Submission;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List all submissions, newest first (admin)
#[utoipa::path(
    get,
    path = "/api/admin/submissions",
    tag = "grading",
    responses(
        (status = 200, description = "All submissions", body = inline(SuccessResponse<Vec<Submission>>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/admin/submissions")]
pub async fn list_submissions_handler(
    admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.grading.list.execute().await {
        Ok(submissions) => ApiResponse::success(submissions),
        Err(e) => {
            error!(admin_id = %admin.user_id, error = %e, "Failed to list submissions");
            ApiResponse::internal_error()
        }
    }
}
