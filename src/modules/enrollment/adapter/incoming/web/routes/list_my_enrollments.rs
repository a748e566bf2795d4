use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::domain::entities::Enrollment;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List my enrollments
#[utoipa::path(
    get,
    path = "/api/enrollments/my",
    tag = "enrollments",
    responses(
        (status = 200, description = "Enrollments of the caller", body = inline(SuccessResponse<Vec<Enrollment>>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/enrollments/my")]
pub async fn list_my_enrollments_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.enrollment.list_mine.execute(user.user_id).await {
        Ok(enrollments) => ApiResponse::success(enrollments),
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Failed to list enrollments");
            ApiResponse::internal_error()
        }
    }
}
