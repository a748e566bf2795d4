use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::course::application::domain::entities::Course;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List the course catalog
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    responses(
        (status = 200, description = "All courses", body = inline(SuccessResponse<Vec<Course>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/courses")]
pub async fn list_courses_handler(data: web::Data<AppState>) -> impl Responder {
    match data.course.list.execute().await {
        Ok(courses) => ApiResponse::success(courses),
        Err(e) => {
            error!(error = %e, "Failed to list courses");
            ApiResponse::internal_error()
        }
    }
}
