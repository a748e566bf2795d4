use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::ports::incoming::use_cases::{
    SignupError, SignupInput, SignupOutput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SignupRequestDto {
    #[schema(example = "a@x.com")]
    pub email: String,

    #[schema(example = "Ada")]
    pub name: String,
}

fn map_signup_error(e: SignupError) -> actix_web::HttpResponse {
    match e {
        SignupError::UserAlreadyExists => {
            warn!("Signup rejected: duplicate email");
            ApiResponse::bad_request(
                "USER_ALREADY_EXISTS",
                "An account with this email already exists",
            )
        }
        SignupError::InvalidInput(msg) => {
            warn!(reason = %msg, "Signup rejected: invalid input");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        SignupError::SessionError(msg) => {
            error!(error = %msg, "Session issue failed during signup");
            ApiResponse::internal_error()
        }
        SignupError::RepositoryError(msg) => {
            error!(error = %msg, "Repository error during signup");
            ApiResponse::internal_error()
        }
    }
}

/// Create an account
///
/// Privileged emails are created verified. Everyone else receives a
/// verification mail; the response message says whether it could be sent.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (
            status = 201,
            description = "Account created",
            body = inline(SuccessResponse<SignupOutput>),
            example = json!({
                "success": true,
                "data": {
                    "user": {
                        "id": "123e4567-e89b-12d3-a456-426614174000",
                        "email": "a@x.com",
                        "name": "Ada",
                        "isVerified": false,
                        "isAdmin": false
                    },
                    "sessionToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                    "message": "Account created. Please check your email to verify your account."
                }
            })
        ),
        (
            status = 400,
            description = "Duplicate email or invalid input",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "USER_ALREADY_EXISTS",
                    "message": "An account with this email already exists"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signup")]
pub async fn signup_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    info!(email = %dto.email, "Signup attempt");

    let input = SignupInput {
        email: dto.email.trim().to_string(),
        name: dto.name.trim().to_string(),
    };

    match data.auth.signup.execute(input).await {
        Ok(output) => {
            info!(user_id = %output.user.id, is_admin = output.user.is_admin, "User signed up");
            ApiResponse::created(output)
        }
        Err(e) => map_signup_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::ports::incoming::use_cases::signup::{
        MSG_ADMIN_CREATED, MSG_CHECK_EMAIL, MSG_EMAIL_UNAVAILABLE,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::RecordingNotifier;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn signup_returns_created_with_unverified_user() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(signup_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({ "email": "a@x.com", "name": "A" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["isVerified"], false);
        assert_eq!(body["data"]["message"], MSG_CHECK_EMAIL);
        assert!(body["data"]["sessionToken"].as_str().is_some());
        assert!(body["data"]["user"].get("verificationToken").is_none());
        assert!(app.notifier.last_token_for("a@x.com").is_some());
    }

    #[actix_web::test]
    async fn signup_reports_unavailable_email_delivery() {
        let app = TestAppStateBuilder::default()
            .with_notifier(Arc::new(RecordingNotifier::failing()))
            .build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(signup_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({ "email": "a@x.com", "name": "A" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["message"], MSG_EMAIL_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn signup_of_allow_listed_email_creates_verified_admin() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(signup_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({ "email": TestAppStateBuilder::ADMIN_EMAIL, "name": "Root" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["isAdmin"], true);
        assert_eq!(body["data"]["user"]["isVerified"], true);
        assert_eq!(body["data"]["message"], MSG_ADMIN_CREATED);
    }

    #[actix_web::test]
    async fn duplicate_signup_is_rejected() {
        let app = TestAppStateBuilder::default().build();
        app.create_user("a@x.com", false).await;
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(signup_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({ "email": "a@x.com", "name": "Again" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");
    }

    #[actix_web::test]
    async fn malformed_email_is_a_validation_error() {
        let app = TestAppStateBuilder::default().build();
        let srv = test::init_service(
            App::new()
                .app_data(app.state.clone())
                .service(signup_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({ "email": "not-an-email", "name": "A" }))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
