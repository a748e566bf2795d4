use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::enrollment::application::domain::policies::AccessDenial;
use crate::modules::grading::application::domain::entities::Submission;
use crate::modules::grading::application::ports::incoming::use_cases::{
    CreateSubmissionError, CreateSubmissionInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequestDto {
    #[schema(example = "Support triage agent")]
    pub project_title: String,
    #[schema(example = "An agent that labels incoming tickets")]
    pub description: String,
    #[serde(default, alias = "url")]
    #[schema(example = "https://github.com/ada/triage-agent")]
    pub project_url: Option<String>,
}

/// Submit a course project
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/submissions",
    tag = "grading",
    params(("course_id" = String, Path, description = "Course id", example = "ai-agents")),
    request_body = CreateSubmissionRequestDto,
    responses(
        (status = 201, description = "Submission stored", body = inline(SuccessResponse<Submission>)),
        (status = 400, description = "Invalid input or email not verified", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 403, description = "No current access to the course", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/courses/{course_id}/submissions")]
pub async fn create_submission_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateSubmissionRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let course_id = path.into_inner();
    let dto = req.into_inner();
    let input = CreateSubmissionInput {
        project_title: dto.project_title,
        description: dto.description,
        project_url: dto.project_url,
    };

    match data.grading.submit.execute(user.user_id, &course_id, input).await {
        Ok(submission) => ApiResponse::created(submission),
        Err(CreateSubmissionError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(CreateSubmissionError::AccessDenied(AccessDenial::EmailNotVerified)) => {
            ApiResponse::bad_request("VERIFICATION_REQUIRED", "Email not verified")
        }
        Err(CreateSubmissionError::AccessDenied(AccessDenial::AccessExpired)) => {
            ApiResponse::forbidden("FORBIDDEN", "Access expired")
        }
        Err(CreateSubmissionError::AccessDenied(_)) => {
            ApiResponse::forbidden("FORBIDDEN", "You do not have access to this course")
        }
        Err(CreateSubmissionError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(CreateSubmissionError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, course_id = %course_id, error = %e, "Failed to store submission");
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
    async fn enrolled_user_can_submit() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", true).await;
        app.enroll(user.id, "security-testing").await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(create_submission_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/courses/security-testing/submissions")
            .insert_header(app.bearer(user.id, false))
            .set_json(serde_json::json!({
                "projectTitle": "Fuzzer",
                "description": "A small HTTP fuzzer",
                "url": "https://example.com/fuzzer"
            }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["projectUrl"], "https://example.com/fuzzer");
        assert_eq!(body["data"]["grade"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn locked_enrollment_cannot_submit() {
        let app = TestAppStateBuilder::default().build();
        let user = app.create_user("a@x.com", true).await;
        app.enroll(user.id, "ai-agents").await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(create_submission_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/courses/ai-agents/submissions")
            .insert_header(app.bearer(user.id, false))
            .set_json(serde_json::json!({ "projectTitle": "A", "description": "B" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
