use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::course::application::domain::entities::Course;
use crate::modules::course::application::ports::incoming::use_cases::GetCourseError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Fetch one course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = "courses",
    params(("course_id" = String, Path, description = "Course id", example = "ai-agents")),
    responses(
        (status = 200, description = "Course", body = inline(SuccessResponse<Course>)),
        (
            status = 404,
            description = "Unknown course",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "COURSE_NOT_FOUND", "message": "Course not found" }
            })
        ),
    )
)]
#[get("/api/courses/{course_id}")]
pub async fn get_course_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = path.into_inner();
    match data.course.get.execute(&course_id).await {
        Ok(course) => ApiResponse::success(course),
        Err(GetCourseError::CourseNotFound) => {
            ApiResponse::not_found("COURSE_NOT_FOUND", "Course not found")
        }
        Err(GetCourseError::RepositoryError(e)) => {
            error!(course_id = %course_id, error = %e, "Failed to fetch course");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn known_and_unknown_course() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(get_course_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/courses/modern-software")
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["price"], 29900);

        let req = test::TestRequest::get().uri("/api/courses/missing").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
