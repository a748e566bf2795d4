use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::ports::incoming::use_cases::{
    CompleteCourseError, CompleteCourseOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCourseRequestDto {
    #[schema(example = "0b6c1f0e-2f7c-4a43-9d55-2b1f7f3c9a10")]
    pub enrollment_id: Uuid,
}

/// Mark a course completed
///
/// Access continues for ten days after completion.
#[utoipa::path(
    post,
    path = "/api/courses/complete",
    tag = "enrollments",
    request_body = CompleteCourseRequestDto,
    responses(
        (status = 200, description = "Completed", body = inline(SuccessResponse<CompleteCourseOutput>)),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "No such enrollment for this user", body = ErrorResponse),
        (status = 409, description = "Already completed and re-completion is rejected", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/courses/complete")]
pub async fn complete_course_handler(
    user: AuthenticatedUser,
    req: web::Json<CompleteCourseRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let enrollment_id = req.into_inner().enrollment_id;

    match data
        .enrollment
        .complete_course
        .execute(user.user_id, enrollment_id)
        .await
    {
        Ok(output) => ApiResponse::success(output),
        Err(CompleteCourseError::EnrollmentNotFound) => {
            warn!(user_id = %user.user_id, enrollment_id = %enrollment_id, "Completion of unknown or foreign enrollment");
            ApiResponse::not_found("ENROLLMENT_NOT_FOUND", "Enrollment not found")
        }
        Err(CompleteCourseError::AlreadyCompleted) => {
            ApiResponse::conflict("ALREADY_COMPLETED", "Course already completed")
        }
        Err(CompleteCourseError::RepositoryError(e)) => {
            error!(enrollment_id = %enrollment_id, error = %e, "Completion failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::enrollment::application::domain::policies::CompletionPolicy;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn completing_someone_elses_enrollment_is_not_found() {
        let app = TestAppStateBuilder::default().build();
        let owner = app.create_user("owner@x.com", true).await;
        let other = app.create_user("other@x.com", true).await;
        let enrollment = app.enroll(owner.id, "security-testing").await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(complete_course_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/courses/complete")
            .insert_header(app.bearer(other.id, false))
            .set_json(serde_json::json!({ "enrollmentId": enrollment.id }))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/courses/complete")
            .insert_header(app.bearer(owner.id, false))
            .set_json(serde_json::json!({ "enrollmentId": enrollment.id }))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["data"]["accessExpiresAt"].as_str().is_some());
    }

    #[actix_web::test]
    async fn second_completion_conflicts_under_reject_policy() {
        let app = TestAppStateBuilder::default()
            .with_completion_policy(CompletionPolicy::Reject)
            .build();
        let user = app.create_user("a@x.com", true).await;
        let enrollment = app.enroll(user.id, "security-testing").await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(complete_course_handler),
        )
        .await;

        let mut statuses = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/courses/complete")
                .insert_header(app.bearer(user.id, false))
                .set_json(serde_json::json!({ "enrollmentId": enrollment.id }))
                .to_request();
            statuses.push(test::call_service(&srv, req).await.status());
        }

        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
    }
}
