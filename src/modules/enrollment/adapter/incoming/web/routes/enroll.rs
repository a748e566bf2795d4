use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::ports::incoming::use_cases::{
    EnrollError, EnrollOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequestDto {
    #[schema(example = "ai-agents")]
    pub course_id: String,
}

/// Enroll in a course
///
/// Free courses unlock immediately for verified users. Paid courses return a
/// locked enrollment with `requiresPayment` and the price in minor units.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "enrollments",
    request_body = EnrollRequestDto,
    responses(
        (
            status = 201,
            description = "Enrollment created or already present",
            body = inline(SuccessResponse<EnrollOutput>),
            example = json!({
                "success": true,
                "data": {
                    "id": "0b6c1f0e-2f7c-4a43-9d55-2b1f7f3c9a10",
                    "userId": "123e4567-e89b-12d3-a456-426614174000",
                    "courseId": "ai-agents",
                    "hasAccess": false,
                    "enrolledAt": "2026-01-10T12:00:00Z",
                    "completedAt": null,
                    "accessExpiresAt": null,
                    "paymentId": null,
                    "paidAmount": null,
                    "requiresPayment": true,
                    "price": 19900
                }
            })
        ),
        (
            status = 400,
            description = "Free course needs a verified email",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "VERIFICATION_REQUIRED",
                    "message": "Please verify your email before enrolling in free courses"
                }
            })
        ),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Unknown course", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/enrollments")]
pub async fn enroll_handler(
    user: AuthenticatedUser,
    req: web::Json<EnrollRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = req.into_inner().course_id;

    match data.enrollment.enroll.execute(user.user_id, &course_id).await {
        Ok(output) => ApiResponse::created(output),
        Err(EnrollError::CourseNotFound) => {
            ApiResponse::not_found("COURSE_NOT_FOUND", "Course not found")
        }
        Err(EnrollError::UserNotFound) => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        Err(EnrollError::VerificationRequired) => {
            warn!(user_id = %user.user_id, course_id = %course_id, "Unverified user tried free enrollment");
            ApiResponse::bad_request(
                "VERIFICATION_REQUIRED",
                "Please verify your email before enrolling in free courses",
            )
        }
        Err(EnrollError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, course_id = %course_id, error = %e, "Enrollment failed");
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
    async fn paid_enrollment_reports_price() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("b@x.com", false).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(enroll_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(app.bearer(user.id, false))
            .set_json(serde_json::json!({ "courseId": "ai-agents" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["hasAccess"], false);
        assert_eq!(body["data"]["requiresPayment"], true);
        assert_eq!(body["data"]["price"], 19900);
        assert_eq!(body["data"]["courseId"], "ai-agents");
    }

    #[actix_web::test]
    async fn free_enrollment_of_unverified_user_is_rejected() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", false).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(enroll_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(app.bearer(user.id, false))
            .set_json(serde_json::json!({ "courseId": "security-testing" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VERIFICATION_REQUIRED");
    }

    #[actix_web::test]
    async fn unknown_course_is_not_found() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", true).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(enroll_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(app.bearer(user.id, false))
            .set_json(serde_json::json!({ "courseId": "missing" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
